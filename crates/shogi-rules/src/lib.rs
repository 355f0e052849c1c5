//! Shogi rules engine
//!
//! Legal move and drop generation, promotion, check and checkmate detection
//! and turn sequencing for standard shogi and smaller boards (3×3 to 9×9).
//!
//! ```
//! use shogi_rules::{Color, Game, Origin};
//!
//! let mut game = Game::standard();
//! assert_eq!(game.submit(Color::Black, "7g7f"), Ok(Color::White));
//! assert!(!game.legal_destinations(Origin::Board("3c".parse().unwrap())).is_empty());
//! ```

pub mod action;
pub mod board;
pub mod check;
pub mod config;
pub mod error;
pub mod game;
pub mod hand;
pub mod layout;
pub mod movegen;
pub mod observer;
pub mod player;
pub mod record;
pub mod snapshot;
pub mod types;

pub use action::{Action, ParseActionError};
pub use board::Board;
pub use config::{ConfigError, GameConfig};
pub use error::{ActionError, InvariantViolation};
pub use game::{Game, Origin, Outcome, TurnReport, TurnState};
pub use hand::Hand;
pub use layout::{Layout, LayoutError};
pub use movegen::SquareSet;
pub use observer::{GameObserver, LogObserver, NullObserver};
pub use player::Player;
pub use record::{Location, MoveRecord};
pub use snapshot::BoardSnapshot;
pub use types::{Color, Dimensions, Direction, Piece, PieceKind, Square};
