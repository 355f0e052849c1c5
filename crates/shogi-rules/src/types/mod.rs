//! 基本型
//!
//! - `Color`: 手番（Player 1 = Black/先手, Player 2 = White/後手）
//! - `PieceKind` / `Piece`: 駒種と盤上の駒
//! - `Square` / `Dimensions` / `Direction`: 座標と方向

mod color;
mod piece;
mod square;

pub use color::Color;
pub use piece::{Piece, PieceKind};
pub use square::{Dimensions, Direction, ParseSquareError, Square};
