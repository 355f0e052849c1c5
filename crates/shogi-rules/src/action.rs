//! Action descriptors and their text form.
//!
//! Text forms follow USI move notation: `7g7f`, `8h2b+` (promote), `P*5e`
//! (drop), plus the commands `resign` and `restart`.

use std::fmt;
use std::str::FromStr;

use crate::types::{ParseSquareError, PieceKind, Square};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Move { from: Square, to: Square, promote: bool },
    Drop { kind: PieceKind, to: Square },
    /// 投了
    Surrender,
    Restart,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseActionError {
    #[error("empty action")]
    Empty,

    #[error("unrecognised action '{0}'")]
    Unrecognised(String),

    #[error(transparent)]
    Square(#[from] ParseSquareError),

    #[error("unknown piece letter '{0}'")]
    UnknownPiece(String),

    #[error("{0} cannot be dropped")]
    NotDroppable(PieceKind),
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseActionError::Empty);
        }
        match s.to_ascii_lowercase().as_str() {
            "resign" | "surrender" => return Ok(Action::Surrender),
            "restart" => return Ok(Action::Restart),
            _ => {}
        }

        if let Some((piece, to)) = s.split_once('*') {
            let mut chars = piece.chars();
            let kind = match (chars.next(), chars.next()) {
                (Some(c), None) => PieceKind::from_char(c),
                _ => None,
            }
            .ok_or_else(|| ParseActionError::UnknownPiece(piece.to_string()))?;
            if !kind.is_droppable() {
                return Err(ParseActionError::NotDroppable(kind));
            }
            return Ok(Action::Drop {
                kind,
                to: to.parse()?,
            });
        }

        let (body, promote) = match s.strip_suffix('+') {
            Some(body) => (body, true),
            None => (s, false),
        };
        match (body.get(0..2), body.get(2..), body.len()) {
            (Some(from), Some(to), 4) => Ok(Action::Move {
                from: from.parse()?,
                to: to.parse()?,
                promote,
            }),
            _ => Err(ParseActionError::Unrecognised(s.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move { from, to, promote } => {
                write!(f, "{from}{to}")?;
                if *promote {
                    f.write_str("+")?;
                }
                Ok(())
            }
            Action::Drop { kind, to } => write!(f, "{}*{to}", kind.to_char()),
            Action::Surrender => f.write_str("resign"),
            Action::Restart => f.write_str("restart"),
        }
    }
}
