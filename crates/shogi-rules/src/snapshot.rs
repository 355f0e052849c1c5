use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::hand::Hand;
use crate::types::{Color, Piece, PieceKind, Square};

/// 駒のJSON表現
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PieceSnapshot {
    /// "black" | "white"
    pub owner: String,
    /// "K" | "R" | "B" | "G" | "S" | "N" | "L" | "P"
    #[serde(rename = "type")]
    pub piece_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promoted: Option<bool>,
}

impl From<Piece> for PieceSnapshot {
    fn from(piece: Piece) -> Self {
        PieceSnapshot {
            owner: piece.color.label().to_string(),
            piece_type: piece.kind.to_char().to_string(),
            promoted: piece.promoted.then_some(true),
        }
    }
}

/// 盤面の1マス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CellSnapshot {
    /// "9a" 形式
    pub square: String,
    pub piece: Option<PieceSnapshot>,
}

/// 持ち駒
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HandSnapshot {
    #[serde(rename = "P", skip_serializing_if = "Option::is_none")]
    pub pawn: Option<u32>,
    #[serde(rename = "L", skip_serializing_if = "Option::is_none")]
    pub lance: Option<u32>,
    #[serde(rename = "N", skip_serializing_if = "Option::is_none")]
    pub knight: Option<u32>,
    #[serde(rename = "S", skip_serializing_if = "Option::is_none")]
    pub silver: Option<u32>,
    #[serde(rename = "G", skip_serializing_if = "Option::is_none")]
    pub gold: Option<u32>,
    #[serde(rename = "B", skip_serializing_if = "Option::is_none")]
    pub bishop: Option<u32>,
    #[serde(rename = "R", skip_serializing_if = "Option::is_none")]
    pub rook: Option<u32>,
}

impl From<&Hand> for HandSnapshot {
    fn from(hand: &Hand) -> Self {
        let count = |kind| match hand.count(kind) {
            0 => None,
            n => Some(u32::from(n)),
        };
        HandSnapshot {
            pawn: count(PieceKind::Pawn),
            lance: count(PieceKind::Lance),
            knight: count(PieceKind::Knight),
            silver: count(PieceKind::Silver),
            gold: count(PieceKind::Gold),
            bishop: count(PieceKind::Bishop),
            rook: count(PieceKind::Rook),
        }
    }
}

/// 両者の持ち駒
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandsSnapshot {
    pub black: HandSnapshot,
    pub white: HandSnapshot,
}

/// Everything a front end needs to draw the game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub width: u8,
    pub height: u8,
    /// Rows top to bottom, each from file `width` down to file 1
    pub cells: Vec<Vec<CellSnapshot>>,
    pub hands: HandsSnapshot,
    /// "black" | "white"
    pub turn: String,
    /// "awaiting_action" | "turn_ended" | "game_over"
    pub state: String,
    pub in_check: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    pub ply: usize,
}

/// Grid part of a snapshot
pub(crate) fn cells(board: &Board) -> Vec<Vec<CellSnapshot>> {
    let dims = board.dims();
    (1..=dims.height())
        .map(|rank| {
            (1..=dims.width())
                .rev()
                .map(|file| {
                    let sq = Square::new(file, rank);
                    CellSnapshot {
                        square: sq.to_string(),
                        piece: board.piece_on(sq).map(PieceSnapshot::from),
                    }
                })
                .collect()
        })
        .collect()
}

pub(crate) fn hands(hands: &[Hand; Color::NUM]) -> HandsSnapshot {
    HandsSnapshot {
        black: HandSnapshot::from(&hands[Color::Black.index()]),
        white: HandSnapshot::from(&hands[Color::White.index()]),
    }
}
