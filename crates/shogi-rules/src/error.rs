//! Error types for the rules engine
//!
//! Two kinds of failure exist:
//! - [`ActionError`]: a submitted action was rejected. The game state is
//!   unchanged and the turn does not advance.
//! - [`InvariantViolation`]: the board no longer satisfies the rules' data
//!   invariants. The session cannot continue and is aborted.

use crate::action::ParseActionError;
use crate::types::{Color, PieceKind, Square};

/// Broken data invariant. Fatal for the session.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// King not found for a specific color
    #[error("King not found for {0}")]
    MissingKing(Color),

    #[error("More than one King for {0}")]
    DuplicateKing(Color),

    /// A King was about to be captured or put into a hand
    #[error("King capture attempted")]
    KingCaptured,

    #[error("Hand has no {0} to remove")]
    HandUnderflow(PieceKind),

    #[error("Square {0} is outside the board")]
    OutOfBounds(Square),
}

/// Rejected action
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("It is not {0}'s turn")]
    NotYourTurn(Color),

    #[error("The game is over")]
    GameOver,

    #[error(transparent)]
    Malformed(#[from] ParseActionError),

    #[error("No piece of the side to move on {0}")]
    NoPiece(Square),

    #[error("Illegal move: {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    #[error("Illegal drop: {kind} on {to}")]
    IllegalDrop { kind: PieceKind, to: Square },

    #[error("No {0} in hand")]
    EmptyHand(PieceKind),

    #[error("Invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl ActionError {
    /// `true` when the session had to be aborted
    pub fn is_fatal(&self) -> bool {
        matches!(self, ActionError::Invariant(_))
    }
}
