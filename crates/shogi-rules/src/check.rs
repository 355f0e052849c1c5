//! 王手・詰み判定
//!
//! Attack queries are answered from [`find_moves`]: a square is attacked by a
//! side when one of its pieces could move there. "Would the King be safe
//! after this move" is answered by applying the move through a
//! [`crate::board::Speculation`] and asking again.

use smallvec::SmallVec;

use crate::board::Board;
use crate::error::InvariantViolation;
use crate::hand::Hand;
use crate::movegen::pattern::{is_slider, rays, Reach};
use crate::movegen::{drop_squares, find_moves, SquareSet};
use crate::types::{Color, Piece, PieceKind, Square};

/// Squares of pieces attacking a target
pub type Attackers = SmallVec<[Square; 4]>;

/// Pieces of `by` that attack `target`.
pub fn attackers_of(board: &Board, target: Square, by: Color) -> Attackers {
    board
        .pieces_of(by)
        .filter(|&(from, _)| find_moves(board, from).contains(&target))
        .map(|(from, _)| from)
        .collect()
}

pub fn is_attacked(board: &Board, target: Square, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|(from, _)| find_moves(board, from).contains(&target))
}

/// Pieces giving check to `color`'s King.
pub fn checkers(board: &Board, color: Color) -> Result<Attackers, InvariantViolation> {
    let king = board.king_square(color)?;
    Ok(attackers_of(board, king, color.opponent()))
}

/// Is `color`'s King attacked?
pub fn is_check(board: &Board, color: Color) -> Result<bool, InvariantViolation> {
    let king = board.king_square(color)?;
    Ok(is_attacked(board, king, color.opponent()))
}

/// Empty squares strictly between a sliding attacker and the King it attacks.
///
/// Empty when the attacker steps (including Knight jumps and one-step sliders).
pub fn squares_between(board: &Board, attacker: Square, king: Square) -> SquareSet {
    let mut between = SquareSet::new();
    let Some(piece) = board.piece_on(attacker).filter(|&p| is_slider(p)) else {
        return between;
    };
    let dims = board.dims();
    let reach_max = dims.width().max(dims.height());

    for ray in rays(piece).iter().filter(|r| r.reach == Reach::Slide) {
        between.clear();
        for distance in 1..=reach_max {
            let Some(sq) = attacker.step(ray.dir, distance, piece.color, dims) else {
                break;
            };
            if sq == king {
                return between;
            }
            if board.piece_on(sq).is_some() {
                break;
            }
            between.insert(sq);
        }
    }
    SquareSet::new()
}

/// Would `color`'s King be safe after the piece on `from` moves to `to`?
///
/// Anything on `to` is captured for the duration of the test.
pub fn move_is_safe(
    board: &mut Board,
    color: Color,
    from: Square,
    to: Square,
) -> Result<bool, InvariantViolation> {
    let mut spec = board.speculate();
    spec.relocate(from, to)?;
    Ok(!is_check(&spec, color)?)
}

/// Would `color`'s King be safe after dropping `kind` on `to`?
pub fn drop_is_safe(
    board: &mut Board,
    color: Color,
    kind: PieceKind,
    to: Square,
) -> Result<bool, InvariantViolation> {
    let mut spec = board.speculate();
    spec.place(to, Piece::new(kind, color))?;
    Ok(!is_check(&spec, color)?)
}

/// 詰み判定
///
/// `color` is checkmated when it is in check, its King has no safe square,
/// and either two pieces give check or the single checker can be neither
/// captured nor blocked by a move or a drop from `hand`.
///
/// Blocking drops follow the placement rules only; the drop-pawn-mate rule
/// does not apply to the defending side here.
pub fn is_checkmate(board: &mut Board, hand: &Hand, color: Color) -> Result<bool, InvariantViolation> {
    let king = board.king_square(color)?;
    let checkers = attackers_of(board, king, color.opponent());
    if checkers.is_empty() {
        return Ok(false);
    }

    // 玉の逃げ
    for to in find_moves(board, king) {
        if move_is_safe(board, color, king, to)? {
            return Ok(false);
        }
    }

    // 両王手は玉が動くしかない
    if checkers.len() > 1 {
        return Ok(true);
    }

    let checker = checkers[0];
    let blocks = squares_between(board, checker, king);
    let mut targets = blocks.clone();
    targets.insert(checker);

    // 取る・合駒（移動）
    let defenders: Vec<Square> = board
        .pieces_of(color)
        .filter(|(_, p)| !p.is_king())
        .map(|(sq, _)| sq)
        .collect();
    for from in defenders {
        let moves = find_moves(board, from);
        for &to in moves.intersection(&targets) {
            if move_is_safe(board, color, from, to)? {
                return Ok(false);
            }
        }
    }

    // 合駒（打つ）
    if !blocks.is_empty() {
        for kind in hand.kinds() {
            let squares = drop_squares(board, color, kind);
            for &to in squares.intersection(&blocks) {
                if drop_is_safe(board, color, kind, to)? {
                    return Ok(false);
                }
            }
        }
    }

    Ok(true)
}
