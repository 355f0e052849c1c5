//! Board representation
//!
//! The board is a grid of `Option<Piece>` indexed by square. It is the single
//! authority for occupancy: pieces do not record their own square, so a piece
//! is always found by reading the grid.
//!
//! - `speculate` - scoped simulate-then-rollback over the grid

mod speculate;

use std::fmt;

use log::warn;

pub use self::speculate::Speculation;
use crate::error::InvariantViolation;
use crate::types::{Color, Dimensions, Piece, PieceKind, Square};

/// Board representation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    dims: Dimensions,
    /// Piece on each square, row-major from the top-left corner
    cells: Vec<Option<Piece>>,
}

impl Board {
    /// Create empty board
    pub fn empty(dims: Dimensions) -> Self {
        Board {
            dims,
            cells: vec![None; dims.len()],
        }
    }

    /// 平手の初期配置
    pub fn standard() -> Self {
        use PieceKind::*;
        const BACK_RANK: [PieceKind; 9] =
            [Lance, Knight, Silver, Gold, King, Gold, Silver, Knight, Lance];

        let mut board = Board::empty(Dimensions::STANDARD);
        for (i, kind) in BACK_RANK.into_iter().enumerate() {
            let file = 9 - i as u8;
            board.fill(Square::new(file, 1), Piece::new(kind, Color::White));
            board.fill(Square::new(file, 9), Piece::new(kind, Color::Black));
            board.fill(Square::new(file, 3), Piece::new(Pawn, Color::White));
            board.fill(Square::new(file, 7), Piece::new(Pawn, Color::Black));
        }
        board.fill(Square::new(8, 2), Piece::new(Rook, Color::White));
        board.fill(Square::new(2, 2), Piece::new(Bishop, Color::White));
        board.fill(Square::new(2, 8), Piece::new(Rook, Color::Black));
        board.fill(Square::new(8, 8), Piece::new(Bishop, Color::Black));
        board
    }

    #[inline]
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    #[inline]
    pub fn contains(&self, sq: Square) -> bool {
        self.dims.contains(sq)
    }

    /// Get piece on square (`None` for empty or off-board squares)
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        if self.contains(sq) {
            self.cells[self.dims.index(sq)]
        } else {
            None
        }
    }

    #[inline]
    pub fn is_empty_square(&self, sq: Square) -> bool {
        self.contains(sq) && self.cells[self.dims.index(sq)].is_none()
    }

    /// Place piece on board, returning whatever occupied the square before.
    pub fn put_piece(&mut self, sq: Square, piece: Piece) -> Result<Option<Piece>, InvariantViolation> {
        self.set_cell(sq, Some(piece))
    }

    /// Remove piece from board
    pub fn remove_piece(&mut self, sq: Square) -> Result<Option<Piece>, InvariantViolation> {
        self.set_cell(sq, None)
    }

    /// The only write path into the grid.
    pub(crate) fn set_cell(
        &mut self,
        sq: Square,
        piece: Option<Piece>,
    ) -> Result<Option<Piece>, InvariantViolation> {
        if !self.contains(sq) {
            warn!("Write to {sq} outside {}x{} board", self.dims.height(), self.dims.width());
            return Err(InvariantViolation::OutOfBounds(sq));
        }
        let idx = self.dims.index(sq);
        Ok(std::mem::replace(&mut self.cells[idx], piece))
    }

    /// Write a square known to lie on the board.
    fn fill(&mut self, sq: Square, piece: Piece) {
        let idx = self.dims.index(sq);
        self.cells[idx] = Some(piece);
    }

    /// Start a speculative edit. Every cell changed through the returned
    /// guard is restored when the guard goes out of scope.
    pub fn speculate(&mut self) -> Speculation<'_> {
        Speculation::new(self)
    }

    /// All occupied squares with their pieces, top row first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.dims
            .squares()
            .zip(self.cells.iter())
            .filter_map(|(sq, cell)| cell.map(|p| (sq, p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Find king square
    pub fn king_square(&self, color: Color) -> Result<Square, InvariantViolation> {
        let mut kings = self.pieces_of(color).filter(|(_, p)| p.is_king()).map(|(sq, _)| sq);
        let king = kings.next().ok_or_else(|| {
            warn!("No king found for {color}");
            InvariantViolation::MissingKing(color)
        })?;
        if kings.next().is_some() {
            warn!("Multiple kings found for {color}");
            return Err(InvariantViolation::DuplicateKing(color));
        }
        Ok(king)
    }

    /// 二歩判定: does `color` have an unpromoted pawn on `file`?
    pub fn has_unpromoted_pawn_on_file(&self, color: Color, file: u8) -> bool {
        (1..=self.dims.height()).any(|rank| {
            self.piece_on(Square::new(file, rank)).is_some_and(|p| {
                p.color == color && p.kind == PieceKind::Pawn && !p.promoted
            })
        })
    }

    /// Check the occupancy invariants: exactly one King per side.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        for color in Color::ALL {
            self.king_square(color)?;
        }
        Ok(())
    }
}

/// One row per line, tokens separated by commas, `_` for empty squares.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.dims.width() as usize;
        for (i, row) in self.cells.chunks(width).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let tokens: Vec<String> = row
                .iter()
                .map(|cell| cell.map_or_else(|| "_".to_string(), |p| p.token()))
                .collect();
            f.write_str(&tokens.join(","))?;
        }
        Ok(())
    }
}
