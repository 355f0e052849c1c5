//! 駒の利きパターン
//!
//! Every piece's movement is a list of rays. A ray is a direction plus a
//! reach: one square (`Step`) or until blocked (`Slide`).

use crate::types::{Direction, Piece, PieceKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reach {
    Step,
    Slide,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ray {
    pub dir: Direction,
    pub reach: Reach,
}

const fn step(dir: Direction) -> Ray {
    Ray {
        dir,
        reach: Reach::Step,
    }
}

const fn slide(dir: Direction) -> Ray {
    Ray {
        dir,
        reach: Reach::Slide,
    }
}

use Direction::*;

const KING: [Ray; 8] = [
    step(North),
    step(NorthEast),
    step(East),
    step(SouthEast),
    step(South),
    step(SouthWest),
    step(West),
    step(NorthWest),
];

// 金と成駒（と・成香・成桂・成銀）
const GOLD: [Ray; 6] = [
    step(North),
    step(NorthEast),
    step(NorthWest),
    step(East),
    step(West),
    step(South),
];

const SILVER: [Ray; 5] = [
    step(North),
    step(NorthEast),
    step(NorthWest),
    step(SouthEast),
    step(SouthWest),
];

const KNIGHT: [Ray; 2] = [step(KnightEast), step(KnightWest)];

const LANCE: [Ray; 1] = [slide(North)];

const PAWN: [Ray; 1] = [step(North)];

const BISHOP: [Ray; 4] = [
    slide(NorthEast),
    slide(SouthEast),
    slide(SouthWest),
    slide(NorthWest),
];

// 馬
const HORSE: [Ray; 8] = [
    slide(NorthEast),
    slide(SouthEast),
    slide(SouthWest),
    slide(NorthWest),
    step(North),
    step(East),
    step(South),
    step(West),
];

const ROOK: [Ray; 4] = [slide(North), slide(East), slide(South), slide(West)];

// 龍
const DRAGON: [Ray; 8] = [
    slide(North),
    slide(East),
    slide(South),
    slide(West),
    step(NorthEast),
    step(SouthEast),
    step(SouthWest),
    step(NorthWest),
];

/// Movement rays of `piece`, oriented for its owner by [`crate::types::Square::step`].
pub fn rays(piece: Piece) -> &'static [Ray] {
    use PieceKind::*;
    match (piece.kind, piece.promoted) {
        (King, _) => &KING,
        (Gold, _) => &GOLD,
        (Silver | Knight | Lance | Pawn, true) => &GOLD,
        (Silver, false) => &SILVER,
        (Knight, false) => &KNIGHT,
        (Lance, false) => &LANCE,
        (Pawn, false) => &PAWN,
        (Bishop, false) => &BISHOP,
        (Bishop, true) => &HORSE,
        (Rook, false) => &ROOK,
        (Rook, true) => &DRAGON,
    }
}

/// Does `piece` have at least one sliding ray?
pub fn is_slider(piece: Piece) -> bool {
    rays(piece).iter().any(|r| r.reach == Reach::Slide)
}
