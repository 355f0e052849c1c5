//! 駒種（PieceKind）と駒（Piece）

use std::fmt;

use super::Color;

/// Piece kinds (8 kinds). Promotion is carried separately on [`Piece`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,   // P
    Lance = 1,  // L
    Knight = 2, // N
    Silver = 3, // S
    Gold = 4,   // G
    Bishop = 5, // B
    Rook = 6,   // R
    King = 7,   // K
}

impl PieceKind {
    pub const NUM: usize = 8;

    pub const ALL: [PieceKind; 8] = [
        PieceKind::Pawn,
        PieceKind::Lance,
        PieceKind::Knight,
        PieceKind::Silver,
        PieceKind::Gold,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::King,
    ];

    // 持ち駒の並び順（King を除く 7 種、価値の高い順）
    pub const HAND: [PieceKind; 7] = [
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Gold,
        PieceKind::Silver,
        PieceKind::Knight,
        PieceKind::Lance,
        PieceKind::Pawn,
    ];

    /// King and Gold never promote.
    #[inline]
    pub const fn can_promote(self) -> bool {
        !matches!(self, PieceKind::King | PieceKind::Gold)
    }

    #[inline]
    pub const fn is_droppable(self) -> bool {
        !matches!(self, PieceKind::King)
    }

    /// Index into a hand's count array (King は None)
    #[inline]
    pub const fn hand_index(self) -> Option<usize> {
        match self {
            PieceKind::King => None,
            _ => Some(self as usize),
        }
    }

    /// Uppercase abbreviation
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Lance => 'L',
            PieceKind::Knight => 'N',
            PieceKind::Silver => 'S',
            PieceKind::Gold => 'G',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::King => 'K',
        }
    }

    /// Case-insensitive lookup from an abbreviation.
    pub const fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'L' => Some(PieceKind::Lance),
            'N' => Some(PieceKind::Knight),
            'S' => Some(PieceKind::Silver),
            'G' => Some(PieceKind::Gold),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Lance => "Lance",
            PieceKind::Knight => "Knight",
            PieceKind::Silver => "Silver",
            PieceKind::Gold => "Gold",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::King => "King",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A piece on the board.
///
/// Pieces carry no location: the board grid is the only record of where a
/// piece stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub promoted: bool,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece {
            kind,
            color,
            promoted: false,
        }
    }

    /// Promoted piece, or `None` for King and Gold.
    #[inline]
    pub const fn promoted(kind: PieceKind, color: Color) -> Option<Self> {
        if kind.can_promote() {
            Some(Piece {
                kind,
                color,
                promoted: true,
            })
        } else {
            None
        }
    }

    /// Promote this piece (no-op for kinds that cannot promote)
    #[inline]
    pub const fn promote(self) -> Self {
        Piece {
            promoted: self.kind.can_promote(),
            ..self
        }
    }

    #[inline]
    pub const fn is_king(self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Layout token: uppercase for Black, lowercase for White, `+` prefix when promoted.
    pub fn token(self) -> String {
        let c = match self.color {
            Color::Black => self.kind.to_char(),
            Color::White => self.kind.to_char().to_ascii_lowercase(),
        };
        if self.promoted { format!("+{c}") } else { c.to_string() }
    }

    /// Parse a layout token (`P`, `p`, `+R`, ...).
    pub fn from_token(token: &str) -> Option<Piece> {
        let (promoted, rest) = match token.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, token),
        };
        let mut chars = rest.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let kind = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::Black
        } else {
            Color::White
        };
        if promoted {
            Piece::promoted(kind, color)
        } else {
            Some(Piece::new(kind, color))
        }
    }

    /// Abbreviation for move records: `P`, `+P`, `R`, `+R`, ...
    pub fn abbreviation(self) -> String {
        if self.promoted {
            format!("+{}", self.kind.to_char())
        } else {
            self.kind.to_char().to_string()
        }
    }
}
