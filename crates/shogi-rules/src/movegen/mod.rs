//! 指し手生成
//!
//! Pseudo-legal generation: destinations follow the piece patterns but are
//! not yet filtered for leaving the own King attacked. That filtering lives in
//! [`crate::player`].
//!
//! - `pattern` - per-kind movement rays
//! - `drops` - drop squares, including the drop-pawn-mate test

mod drops;
pub mod pattern;

use std::collections::BTreeSet;

pub use self::drops::{drop_squares, find_drops};
use self::pattern::{rays, Reach};
use crate::board::Board;
use crate::types::{Color, Dimensions, PieceKind, Square};

/// Ordered set of squares
pub type SquareSet = BTreeSet<Square>;

/// Destinations of the piece on `from`, ignoring self-check.
///
/// Empty when `from` is empty or off the board.
pub fn find_moves(board: &Board, from: Square) -> SquareSet {
    let mut out = SquareSet::new();
    let Some(piece) = board.piece_on(from) else {
        return out;
    };
    let dims = board.dims();
    let reach_max = dims.width().max(dims.height());

    for ray in rays(piece) {
        let limit = match ray.reach {
            Reach::Step => 1,
            Reach::Slide => reach_max,
        };
        for distance in 1..=limit {
            let Some(to) = from.step(ray.dir, distance, piece.color, dims) else {
                break;
            };
            match board.piece_on(to) {
                None => {
                    out.insert(to);
                }
                Some(other) => {
                    if other.color != piece.color {
                        out.insert(to);
                    }
                    break;
                }
            }
        }
    }
    out
}

/// 行き所のない駒: an unpromoted `kind` of `color` on `sq` could never move
/// again (Pawn/Lance on the last rank, Knight on the last two).
pub fn is_stranded(dims: Dimensions, sq: Square, color: Color, kind: PieceKind) -> bool {
    let rank = dims.relative_rank(sq, color);
    match kind {
        PieceKind::Pawn | PieceKind::Lance => rank <= 1,
        PieceKind::Knight => rank <= 2,
        _ => false,
    }
}
