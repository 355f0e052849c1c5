//! 自殺手（自玉を取られる手）の除外

use shogi_rules::check;
use shogi_rules::{
    ActionError, Board, Color, Dimensions, Game, Hand, Layout, NullObserver, Origin, Piece, PieceKind, Square,
    SquareSet,
};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn game_with(pieces: &[(&str, &str)], side_to_move: Color) -> Game {
    game_with_hand(pieces, &[], side_to_move)
}

fn game_with_hand(pieces: &[(&str, &str)], hand: &[PieceKind], side_to_move: Color) -> Game {
    let mut board = Board::empty(Dimensions::STANDARD);
    for (square, token) in pieces {
        board.put_piece(sq(square), Piece::from_token(token).unwrap()).unwrap();
    }
    let mut hands = [Hand::EMPTY; 2];
    for &kind in hand {
        hands[side_to_move.index()].add(kind).unwrap();
    }
    let layout = Layout {
        board,
        hands,
        side_to_move,
    };
    layout.validate().unwrap();
    Game::with_observer(layout, Box::new(NullObserver))
}

/// Every published move and drop of the side to move keeps its King safe.
fn assert_published_actions_safe(game: &Game) {
    let color = game.side_to_move();
    let player = game.player(color);
    let mut board = game.board().clone();
    for (&from, dests) in player.moves() {
        for &to in dests {
            assert!(check::move_is_safe(&mut board, color, from, to).unwrap(), "{from}{to}");
        }
    }
    for (&kind, dests) in player.drops() {
        for &to in dests {
            assert!(check::drop_is_safe(&mut board, color, kind, to).unwrap(), "{kind}*{to}");
        }
    }
    assert_eq!(&board, game.board());
}

#[test]
fn test_pinned_silver_keeps_only_the_file() {
    let mut game = game_with(&[("5i", "K"), ("5h", "S"), ("5a", "r"), ("1a", "k")], Color::Black);
    assert_eq!(
        game.legal_destinations(Origin::Board(sq("5h"))),
        SquareSet::from([sq("5g")])
    );
    assert_eq!(
        game.submit(Color::Black, "5h4g"),
        Err(ActionError::IllegalMove {
            from: sq("5h"),
            to: sq("4g")
        })
    );
    assert_eq!(game.submit(Color::Black, "5h5g"), Ok(Color::White));
}

#[test]
fn test_king_does_not_step_into_attack() {
    let game = game_with(&[("5i", "K"), ("4a", "r"), ("1a", "k")], Color::Black);
    let king = game.legal_destinations(Origin::Board(sq("5i")));
    assert_eq!(king, SquareSet::from([sq("5h"), sq("6h"), sq("6i")]));
}

#[test]
fn test_king_cannot_retreat_along_checking_line() {
    // The rook checks along rank i; 6i stays on the line once the king moves.
    let game = game_with(&[("5i", "K"), ("1i", "r"), ("1a", "k")], Color::Black);
    let king = game.legal_destinations(Origin::Board(sq("5i")));
    assert!(!king.contains(&sq("6i")));
    assert!(king.contains(&sq("5h")));
}

#[test]
fn test_capturing_defended_piece_with_king_is_excluded() {
    let game = game_with(&[("5i", "K"), ("5h", "p"), ("5g", "g"), ("1a", "k")], Color::Black);
    assert!(game.player(Color::Black).in_check());
    assert!(!game.legal_destinations(Origin::Board(sq("5i"))).contains(&sq("5h")));
}

#[test]
fn test_pinned_defender_cannot_capture_checker() {
    // 4gの桂が王手。5hの金は取り返せるが、5aの飛車にピンされている
    let pinned = game_with(&[("5i", "K"), ("5h", "G"), ("4g", "n"), ("5a", "r"), ("1a", "k")], Color::Black);
    assert!(pinned.player(Color::Black).in_check());
    assert!(!pinned.legal_destinations(Origin::Board(sq("5h"))).contains(&sq("4g")));
    assert!(pinned.legal_destinations(Origin::Board(sq("5h"))).is_empty());
    assert!(!pinned.is_game_over());
    assert_published_actions_safe(&pinned);

    let free = game_with(&[("5i", "K"), ("5h", "G"), ("4g", "n"), ("1a", "k")], Color::Black);
    assert_eq!(
        free.legal_destinations(Origin::Board(sq("5h"))),
        SquareSet::from([sq("4g")])
    );
}

#[test]
fn test_drops_while_in_check_only_interpose() {
    let game = game_with_hand(
        &[("5i", "K"), ("5a", "r"), ("1a", "k")],
        &[PieceKind::Gold, PieceKind::Pawn],
        Color::Black,
    );
    assert!(game.player(Color::Black).in_check());
    let file: SquareSet = (2..=8).map(|rank| Square::new(5, rank)).collect();
    assert_eq!(game.legal_destinations(Origin::Hand(PieceKind::Gold)), file);
    assert_eq!(game.legal_destinations(Origin::Hand(PieceKind::Pawn)), file);
    assert_published_actions_safe(&game);
}

#[test]
fn test_no_published_action_leaves_king_attacked() {
    let game = Game::with_observer(Layout::standard(), Box::new(NullObserver));
    assert_published_actions_safe(&game);

    let mut game = game_with_hand(
        &[("5i", "K"), ("5h", "S"), ("4h", "G"), ("5a", "r"), ("2f", "b"), ("1a", "k")],
        &[PieceKind::Silver, PieceKind::Knight, PieceKind::Pawn],
        Color::Black,
    );
    assert!(!game.player(Color::Black).in_check());
    assert_eq!(
        game.legal_destinations(Origin::Board(sq("4h"))),
        SquareSet::from([sq("3g")])
    );
    assert!(!game.player(Color::Black).drops().is_empty());
    assert_published_actions_safe(&game);
    game.submit(Color::Black, "5h5g").unwrap();
    assert_published_actions_safe(&game);
}
