//! 棋譜（move log）
//!
//! Entries are append-only and display-only: the engine never reads them
//! back to reconstruct state.

use std::fmt;

use crate::action::Action;
use crate::types::{Color, Piece, Square};

/// Where a moved piece came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    Board(Square),
    /// 駒台
    Hand,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub mover: Color,
    /// The piece as it stood before the action
    pub piece: Piece,
    pub from: Location,
    pub to: Square,
    pub captured: Option<Piece>,
    pub promoted: bool,
}

impl MoveRecord {
    /// The action that produced this entry, in submission form.
    pub fn to_action(&self) -> Action {
        match self.from {
            Location::Board(from) => Action::Move {
                from,
                to: self.to,
                promote: self.promoted,
            },
            Location::Hand => Action::Drop {
                kind: self.piece.kind,
                to: self.to,
            },
        }
    }
}

/// `Black P7g-7f`, `White S*5e`, `Black B8hx2b+`
impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.mover, self.piece.abbreviation())?;
        match self.from {
            Location::Board(from) => {
                let sep = if self.captured.is_some() { 'x' } else { '-' };
                write!(f, "{from}{sep}{}", self.to)?;
            }
            Location::Hand => write!(f, "*{}", self.to)?,
        }
        if self.promoted {
            f.write_str("+")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_display() {
        let step = MoveRecord {
            mover: Color::Black,
            piece: Piece::new(PieceKind::Pawn, Color::Black),
            from: Location::Board(sq("7g")),
            to: sq("7f"),
            captured: None,
            promoted: false,
        };
        assert_eq!(step.to_string(), "Black P7g-7f");

        let capture = MoveRecord {
            mover: Color::Black,
            piece: Piece::new(PieceKind::Bishop, Color::Black),
            from: Location::Board(sq("8h")),
            to: sq("2b"),
            captured: Some(Piece::new(PieceKind::Bishop, Color::White)),
            promoted: true,
        };
        assert_eq!(capture.to_string(), "Black B8hx2b+");
        assert_eq!(capture.to_action().to_string(), "8h2b+");

        let drop = MoveRecord {
            mover: Color::White,
            piece: Piece::new(PieceKind::Silver, Color::White),
            from: Location::Hand,
            to: sq("5e"),
            captured: None,
            promoted: false,
        };
        assert_eq!(drop.to_string(), "White S*5e");
        assert_eq!(drop.to_action().to_string(), "S*5e");
    }

    #[test]
    fn test_promoted_piece_abbreviation() {
        let record = MoveRecord {
            mover: Color::White,
            piece: Piece::new(PieceKind::Rook, Color::White).promote(),
            from: Location::Board(sq("2h")),
            to: sq("2i"),
            captured: None,
            promoted: false,
        };
        assert_eq!(record.to_string(), "White +R2h-2i");
    }
}
