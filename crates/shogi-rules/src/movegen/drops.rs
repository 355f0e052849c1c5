//! 駒打ち
//!
//! Drop legality: empty square, 二歩, 行き所のない駒, and for pawns the
//! 打ち歩詰め test.

use log::debug;

use super::{is_stranded, SquareSet};
use crate::board::Board;
use crate::check;
use crate::error::InvariantViolation;
use crate::hand::Hand;
use crate::types::{Color, Direction, Piece, PieceKind};

/// Squares where `color` may drop `kind` under the placement rules alone.
///
/// Ignores the hand and the drop-pawn-mate rule. Used directly when checking
/// whether a drop can interpose against a check.
pub fn drop_squares(board: &Board, color: Color, kind: PieceKind) -> SquareSet {
    if !kind.is_droppable() {
        return SquareSet::new();
    }
    let dims = board.dims();
    dims.squares()
        .filter(|&sq| board.is_empty_square(sq))
        .filter(|&sq| !is_stranded(dims, sq, color, kind))
        .filter(|&sq| kind != PieceKind::Pawn || !board.has_unpromoted_pawn_on_file(color, sq.file()))
        .collect()
}

/// Legal drop squares for `color` and `kind`, given both sides' hands.
///
/// Empty when the hand holds no `kind`. The board is only touched through a
/// speculation guard and is unchanged on return, error or not.
pub fn find_drops(
    board: &mut Board,
    hands: &[Hand; Color::NUM],
    color: Color,
    kind: PieceKind,
) -> Result<SquareSet, InvariantViolation> {
    if !hands[color.index()].has(kind) {
        return Ok(SquareSet::new());
    }
    let mut squares = drop_squares(board, color, kind);

    if kind == PieceKind::Pawn {
        // 打ち歩詰め: only the square directly in front of the enemy King can
        // give check with a pawn.
        let them = color.opponent();
        let king = board.king_square(them)?;
        if let Some(target) = king.step(Direction::South, 1, color, board.dims()) {
            if squares.contains(&target) {
                let mated = {
                    let mut spec = board.speculate();
                    spec.place(target, Piece::new(PieceKind::Pawn, color))?;
                    check::is_checkmate(spec.board_mut(), &hands[them.index()], them)?
                };
                if mated {
                    debug!("pawn drop on {target} would be drop-pawn-mate");
                    squares.remove(&target);
                }
            }
        }
    }
    Ok(squares)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dimensions, Square};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn kings() -> Board {
        let mut board = Board::empty(Dimensions::STANDARD);
        board.put_piece(sq("5i"), Piece::new(PieceKind::King, Color::Black)).unwrap();
        board.put_piece(sq("1a"), Piece::new(PieceKind::King, Color::White)).unwrap();
        board
    }

    #[test]
    fn test_nifu_excludes_file() {
        let mut board = kings();
        board.put_piece(sq("7g"), Piece::new(PieceKind::Pawn, Color::Black)).unwrap();
        let squares = drop_squares(&board, Color::Black, PieceKind::Pawn);
        assert!(squares.iter().all(|s| s.file() != 7));
        assert!(squares.contains(&sq("6e")));
        assert!(!squares.contains(&sq("6a")));

        // A promoted pawn does not count.
        board.put_piece(sq("7g"), Piece::new(PieceKind::Pawn, Color::Black).promote()).unwrap();
        let squares = drop_squares(&board, Color::Black, PieceKind::Pawn);
        assert!(squares.contains(&sq("7e")));
    }

    #[test]
    fn test_knight_and_lance_ranks() {
        let board = kings();
        let knight = drop_squares(&board, Color::Black, PieceKind::Knight);
        assert!(knight.iter().all(|s| s.rank() >= 3));
        let lance = drop_squares(&board, Color::White, PieceKind::Lance);
        assert!(lance.iter().all(|s| s.rank() <= 8));
        assert!(lance.contains(&sq("5h")));
        let gold = drop_squares(&board, Color::Black, PieceKind::Gold);
        assert_eq!(gold.len(), 81 - 2);
    }

    #[test]
    fn test_empty_hand_has_no_drops() {
        let mut board = kings();
        let hands = [Hand::EMPTY, Hand::EMPTY];
        let drops = find_drops(&mut board, &hands, Color::Black, PieceKind::Gold).unwrap();
        assert!(drops.is_empty());
    }

    #[test]
    fn test_pawn_check_that_is_not_mate_is_allowed() {
        let mut board = kings();
        let before = board.clone();
        let mut black = Hand::EMPTY;
        black.add(PieceKind::Pawn).unwrap();
        let hands = [black, Hand::EMPTY];
        let drops = find_drops(&mut board, &hands, Color::Black, PieceKind::Pawn).unwrap();
        assert!(drops.contains(&sq("1b")));
        assert_eq!(board, before);
    }
}
