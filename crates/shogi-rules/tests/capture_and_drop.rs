//! 駒取りと駒打ちの往復

use shogi_rules::{
    ActionError, Board, Color, Dimensions, Game, Hand, Layout, NullObserver, Piece, PieceKind, Square,
};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn game_with(pieces: &[(&str, &str)]) -> Game {
    let mut board = Board::empty(Dimensions::STANDARD);
    for (square, token) in pieces {
        board.put_piece(sq(square), Piece::from_token(token).unwrap()).unwrap();
    }
    let layout = Layout {
        board,
        hands: [Hand::EMPTY; 2],
        side_to_move: Color::Black,
    };
    layout.validate().unwrap();
    Game::with_observer(layout, Box::new(NullObserver))
}

#[test]
fn test_captured_promoted_silver_returns_as_silver() {
    let mut game = game_with(&[("5e", "S"), ("5d", "+s"), ("9i", "K"), ("1a", "k")]);

    game.submit(Color::Black, "5e5d").unwrap();
    let hand = game.player(Color::Black).hand();
    assert_eq!(hand.count(PieceKind::Silver), 1);
    assert_eq!(game.board().piece_on(sq("5d")), Some(Piece::new(PieceKind::Silver, Color::Black)));
    assert!(game.player(Color::White).hand().is_empty());

    game.submit(Color::White, "1a1b").unwrap();
    game.submit(Color::Black, "S*5c").unwrap();
    assert_eq!(game.board().piece_on(sq("5c")), Some(Piece::new(PieceKind::Silver, Color::Black)));
    assert_eq!(game.player(Color::Black).hand().count(PieceKind::Silver), 0);

    let log: Vec<String> = game.move_log().iter().map(ToString::to_string).collect();
    assert_eq!(log, vec!["Black S5ex5d", "White K1a-1b", "Black S*5c"]);
}

#[test]
fn test_drop_needs_a_piece_in_hand() {
    let mut game = game_with(&[("5e", "S"), ("5d", "+s"), ("9i", "K"), ("1a", "k")]);
    assert_eq!(game.submit(Color::Black, "S*5c"), Err(ActionError::EmptyHand(PieceKind::Silver)));
}

#[test]
fn test_drop_on_occupied_square_is_illegal() {
    let mut game = game_with(&[("5e", "S"), ("5d", "+s"), ("9i", "K"), ("1a", "k"), ("2g", "p")]);
    game.submit(Color::Black, "5e5d").unwrap();
    game.submit(Color::White, "1a1b").unwrap();
    assert_eq!(
        game.submit(Color::Black, "S*2g"),
        Err(ActionError::IllegalDrop {
            kind: PieceKind::Silver,
            to: sq("2g")
        })
    );
    assert_eq!(game.player(Color::Black).hand().count(PieceKind::Silver), 1);
}

#[test]
fn test_capture_in_standard_game() {
    let mut game = Game::with_observer(Layout::standard(), Box::new(NullObserver));
    for (color, text) in [
        (Color::Black, "7g7f"),
        (Color::White, "3c3d"),
        (Color::Black, "8h2b+"),
    ] {
        game.submit(color, text).unwrap();
    }
    assert_eq!(game.player(Color::Black).hand().count(PieceKind::Bishop), 1);
    assert_eq!(
        game.board().piece_on(sq("2b")),
        Some(Piece::new(PieceKind::Bishop, Color::Black).promote())
    );
    assert_eq!(game.move_log()[2].to_string(), "Black B8hx2b+");

    // White recaptures the horse and gets a plain bishop.
    game.submit(Color::White, "3a2b").unwrap();
    assert_eq!(game.player(Color::White).hand().count(PieceKind::Bishop), 1);
    assert_eq!(game.board().pieces().count(), 38);
}
