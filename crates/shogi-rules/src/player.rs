//! Player state: hand, piece cache and the published legal tables.
//!
//! The tables are rebuilt at every turn boundary by [`crate::game::Game`] and
//! are the only source the executor consults when validating an action.

use std::collections::BTreeMap;

use log::debug;
use smallvec::SmallVec;

use crate::board::Board;
use crate::check;
use crate::error::InvariantViolation;
use crate::hand::Hand;
use crate::movegen::{find_drops, find_moves, SquareSet};
use crate::types::{Color, PieceKind, Square};

#[derive(Debug, Clone)]
pub struct Player {
    color: Color,
    hand: Hand,
    /// Own board squares, refreshed from the grid each turn
    pieces: Vec<Square>,
    moves: BTreeMap<Square, SquareSet>,
    drops: BTreeMap<PieceKind, SquareSet>,
    in_check: bool,
    checkmated: bool,
}

impl Player {
    pub fn new(color: Color, hand: Hand) -> Self {
        Player {
            color,
            hand,
            pieces: Vec::new(),
            moves: BTreeMap::new(),
            drops: BTreeMap::new(),
            in_check: false,
            checkmated: false,
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub(crate) fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub fn pieces(&self) -> &[Square] {
        &self.pieces
    }

    /// Legal move table, origin square to destinations
    pub fn moves(&self) -> &BTreeMap<Square, SquareSet> {
        &self.moves
    }

    /// Legal drop table, kind to squares
    pub fn drops(&self) -> &BTreeMap<PieceKind, SquareSet> {
        &self.drops
    }

    pub fn moves_from(&self, from: Square) -> Option<&SquareSet> {
        self.moves.get(&from)
    }

    pub fn drops_of(&self, kind: PieceKind) -> Option<&SquareSet> {
        self.drops.get(&kind)
    }

    pub fn can_move(&self, from: Square, to: Square) -> bool {
        self.moves.get(&from).is_some_and(|s| s.contains(&to))
    }

    pub fn can_drop(&self, kind: PieceKind, to: Square) -> bool {
        self.drops.get(&kind).is_some_and(|s| s.contains(&to))
    }

    #[inline]
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    #[inline]
    pub fn is_checkmated(&self) -> bool {
        self.checkmated
    }

    /// At least one legal move or drop is published.
    pub fn has_any_action(&self) -> bool {
        !self.moves.is_empty() || !self.drops.is_empty()
    }

    /// Number of published moves plus drops
    pub fn action_count(&self) -> usize {
        self.moves.values().map(|s| s.len()).sum::<usize>()
            + self.drops.values().map(|s| s.len()).sum::<usize>()
    }

    pub(crate) fn refresh_pieces(&mut self, board: &Board) {
        self.pieces = board.pieces_of(self.color).map(|(sq, _)| sq).collect();
    }

    pub(crate) fn clear_tables(&mut self) {
        self.moves.clear();
        self.drops.clear();
        self.in_check = false;
        self.checkmated = false;
    }

    pub(crate) fn set_check_state(&mut self, in_check: bool, checkmated: bool) {
        self.in_check = in_check;
        self.checkmated = checkmated;
    }

    /// Raw tables: pattern moves for every own piece and drops for every kind
    /// in hand. Self-check is not yet filtered.
    pub(crate) fn compute_tables(
        &mut self,
        board: &mut Board,
        hands: &[Hand; Color::NUM],
    ) -> Result<(), InvariantViolation> {
        self.moves.clear();
        self.drops.clear();
        for &from in &self.pieces {
            let dests = find_moves(board, from);
            if !dests.is_empty() {
                self.moves.insert(from, dests);
            }
        }
        for kind in self.hand.kinds() {
            let squares = find_drops(board, hands, self.color, kind)?;
            if !squares.is_empty() {
                self.drops.insert(kind, squares);
            }
        }
        Ok(())
    }

    /// 王手回避: keep King moves, other moves that capture the checker or
    /// land between it and the King, and drops between them.
    pub(crate) fn restrict_to_evasions(&mut self, king: Square, targets: &SquareSet, blocks: &SquareSet) {
        for (&from, dests) in self.moves.iter_mut() {
            if from != king {
                dests.retain(|to| targets.contains(to));
            }
        }
        for squares in self.drops.values_mut() {
            squares.retain(|to| blocks.contains(to));
        }
        self.prune();
    }

    /// Remove every candidate that leaves the own King attacked.
    ///
    /// Returns how many candidates were discarded.
    pub(crate) fn retain_safe(&mut self, board: &mut Board) -> Result<usize, InvariantViolation> {
        let color = self.color;
        let mut discarded = 0;

        for (&from, dests) in self.moves.iter_mut() {
            let mut rejected: SmallVec<[Square; 8]> = SmallVec::new();
            for &to in dests.iter() {
                if !check::move_is_safe(board, color, from, to)? {
                    rejected.push(to);
                }
            }
            for to in &rejected {
                dests.remove(to);
            }
            discarded += rejected.len();
        }

        for (&kind, squares) in self.drops.iter_mut() {
            let mut rejected: SmallVec<[Square; 8]> = SmallVec::new();
            for &to in squares.iter() {
                if !check::drop_is_safe(board, color, kind, to)? {
                    rejected.push(to);
                }
            }
            for to in &rejected {
                squares.remove(to);
            }
            discarded += rejected.len();
        }

        self.prune();
        debug!("{color}: discarded {discarded} self-check candidates");
        Ok(discarded)
    }

    fn prune(&mut self) {
        self.moves.retain(|_, dests| !dests.is_empty());
        self.drops.retain(|_, squares| !squares.is_empty());
    }
}
