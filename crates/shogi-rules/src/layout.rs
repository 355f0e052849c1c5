//! 初期配置の読み込み
//!
//! A layout is plain text:
//!
//! ```text
//! # comment
//! 9x9
//! l,n,s,g,k,g,s,n,l
//! _,r,_,_,_,_,_,b,_
//! ...
//! hand: P,P,s
//! turn: 2
//! ```
//!
//! The header gives rows then columns (`9x9`, `9 9` or `9,9`). Each row line
//! lists one token per column from file `width` down to file 1: uppercase
//! for player 1, lowercase for player 2, `_` for empty, `+` prefix for a
//! promoted piece. `hand:` and `turn:` are optional.

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::check;
use crate::error::InvariantViolation;
use crate::hand::Hand;
use crate::types::{Color, Dimensions, Piece, PieceKind, Square};

/// Standard opening in layout form
pub const STANDARD: &str = "\
9x9
l,n,s,g,k,g,s,n,l
_,r,_,_,_,_,_,b,_
p,p,p,p,p,p,p,p,p
_,_,_,_,_,_,_,_,_
_,_,_,_,_,_,_,_,_
_,_,_,_,_,_,_,_,_
P,P,P,P,P,P,P,P,P
_,B,_,_,_,_,_,R,_
L,N,S,G,K,G,S,N,L
";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout is empty")]
    MissingHeader,

    #[error("line {line}: bad header '{text}', expected e.g. 9x9")]
    BadHeader { line: usize, text: String },

    #[error("unsupported board size {rows}x{columns}")]
    BadDimensions { rows: usize, columns: usize },

    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("line {line}: expected {expected} cells, found {found}")]
    RowWidth {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: bad piece token '{token}'")]
    BadToken { line: usize, token: String },

    #[error("line {line}: bad hand entry '{token}'")]
    BadHand { line: usize, token: String },

    #[error("line {line}: bad turn '{text}', expected 1 or 2")]
    BadTurn { line: usize, text: String },

    #[error("{0} is in check but it is not their turn")]
    WaitingSideInCheck(Color),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

/// A validated starting position
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub board: Board,
    pub hands: [Hand; Color::NUM],
    pub side_to_move: Color,
}

impl Layout {
    /// 平手
    pub fn standard() -> Self {
        Layout {
            board: Board::standard(),
            hands: [Hand::EMPTY; Color::NUM],
            side_to_move: Color::Black,
        }
    }

    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'));

        let (header_line, header) = lines.next().ok_or(LayoutError::MissingHeader)?;
        let (rows, columns) = parse_header(header).ok_or_else(|| LayoutError::BadHeader {
            line: header_line,
            text: header.to_string(),
        })?;
        let dims = u8::try_from(columns)
            .ok()
            .zip(u8::try_from(rows).ok())
            .and_then(|(w, h)| Dimensions::new(w, h))
            .ok_or(LayoutError::BadDimensions { rows, columns })?;

        let mut board = Board::empty(dims);
        let mut hands = [Hand::EMPTY; Color::NUM];
        let mut side_to_move = Color::Black;
        let mut row = 0usize;

        for (line, text) in lines {
            if let Some(rest) = directive(text, "hand") {
                parse_hand(rest, line, &mut hands)?;
                continue;
            }
            if let Some(rest) = directive(text, "turn") {
                side_to_move = rest
                    .parse::<u8>()
                    .ok()
                    .and_then(Color::from_player_number)
                    .ok_or_else(|| LayoutError::BadTurn {
                        line,
                        text: rest.to_string(),
                    })?;
                continue;
            }

            row += 1;
            if row > rows {
                continue;
            }
            let rank = row as u8;
            let tokens: Vec<&str> = text.split(',').map(str::trim).collect();
            if tokens.len() != columns {
                return Err(LayoutError::RowWidth {
                    line,
                    expected: columns,
                    found: tokens.len(),
                });
            }
            for (col, token) in tokens.into_iter().enumerate() {
                if token == "_" {
                    continue;
                }
                let piece = Piece::from_token(token).ok_or_else(|| LayoutError::BadToken {
                    line,
                    token: token.to_string(),
                })?;
                let file = dims.width() - col as u8;
                board.put_piece(Square::new(file, rank), piece)?;
            }
        }
        if row != rows {
            return Err(LayoutError::RowCount {
                expected: rows,
                found: row,
            });
        }

        let layout = Layout {
            board,
            hands,
            side_to_move,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// One King per side, and the side waiting for its turn is not in check.
    pub fn validate(&self) -> Result<(), LayoutError> {
        self.board.validate()?;
        let waiting = self.side_to_move.opponent();
        if check::is_check(&self.board, waiting)? {
            return Err(LayoutError::WaitingSideInCheck(waiting));
        }
        Ok(())
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layout::parse(s)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::standard()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims = self.board.dims();
        writeln!(f, "{}x{}", dims.height(), dims.width())?;
        writeln!(f, "{}", self.board)?;
        let mut tokens = Vec::new();
        for color in Color::ALL {
            let hand = &self.hands[color.index()];
            for kind in hand.kinds() {
                let token = Piece::new(kind, color).token();
                for _ in 0..hand.count(kind) {
                    tokens.push(token.clone());
                }
            }
        }
        if !tokens.is_empty() {
            writeln!(f, "hand: {}", tokens.join(","))?;
        }
        if self.side_to_move != Color::Black {
            writeln!(f, "turn: {}", self.side_to_move.player_number())?;
        }
        Ok(())
    }
}

fn parse_header(text: &str) -> Option<(usize, usize)> {
    let mut parts = text
        .split(|c: char| c == 'x' || c == 'X' || c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty());
    let rows = parts.next()?.parse().ok()?;
    let columns = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((rows, columns))
}

fn directive<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    let (key, rest) = text.split_once(':')?;
    key.trim().eq_ignore_ascii_case(name).then(|| rest.trim())
}

fn parse_hand(text: &str, line: usize, hands: &mut [Hand; Color::NUM]) -> Result<(), LayoutError> {
    if text.is_empty() || text == "-" {
        return Ok(());
    }
    for token in text.split(',').map(str::trim) {
        let bad = || LayoutError::BadHand {
            line,
            token: token.to_string(),
        };
        let piece = Piece::from_token(token).ok_or_else(bad)?;
        if piece.promoted || piece.kind == PieceKind::King {
            return Err(bad());
        }
        hands[piece.color.index()].add(piece.kind)?;
    }
    Ok(())
}
