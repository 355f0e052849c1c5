//! Scoped speculative edits
//!
//! Check and checkmate detection ask "what if this piece stood there?". The
//! answer is computed on the real board: the cells about to change are
//! snapshotted, the edit is applied, the question evaluated, and the snapshot
//! written back when the guard is dropped. Restoration runs from `Drop`, so
//! early returns, `?` and panics all leave the board as it was.

use std::ops::Deref;

use smallvec::SmallVec;

use super::Board;
use crate::error::InvariantViolation;
use crate::types::{Piece, Square};

/// Guard over a board with pending speculative edits.
pub struct Speculation<'a> {
    board: &'a mut Board,
    /// Original content of every touched cell, in first-touch order
    saved: SmallVec<[(Square, Option<Piece>); 4]>,
}

impl<'a> Speculation<'a> {
    pub(super) fn new(board: &'a mut Board) -> Self {
        Speculation {
            board,
            saved: SmallVec::new(),
        }
    }

    /// Overwrite one cell for the lifetime of the guard.
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) -> Result<Option<Piece>, InvariantViolation> {
        let previous = self.board.set_cell(sq, piece)?;
        if !self.saved.iter().any(|(s, _)| *s == sq) {
            self.saved.push((sq, previous));
        }
        Ok(previous)
    }

    /// Move whatever stands on `from` to `to`. An occupant of `to` is removed
    /// (captured) until the guard is dropped and is returned.
    pub fn relocate(&mut self, from: Square, to: Square) -> Result<Option<Piece>, InvariantViolation> {
        let moving = self.set(from, None)?;
        self.set(to, moving)
    }

    /// Put `piece` on `sq` until the guard is dropped.
    pub fn place(&mut self, sq: Square, piece: Piece) -> Result<Option<Piece>, InvariantViolation> {
        self.set(sq, Some(piece))
    }

    /// Number of cells currently held in the snapshot
    #[cfg(test)]
    pub(crate) fn touched(&self) -> usize {
        self.saved.len()
    }

    /// Mutable access for nested speculation. Callers must only change the
    /// board through another [`Speculation`].
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Deref for Speculation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        // saved squares were written successfully, so they are on the board
        while let Some((sq, piece)) = self.saved.pop() {
            let _ = self.board.set_cell(sq, piece);
        }
    }
}
