//! 座標（Square）と方向（Direction）
//!
//! Squares use shogi notation: `file` counts from the right-hand edge as seen
//! by Black (1..=width), `rank` counts from the top edge (1..=height, shown as
//! `a`, `b`, ...). Black sits at the bottom and moves toward rank 1.

use std::fmt;
use std::str::FromStr;

use super::Color;

/// Board size. The standard board is 9×9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: u8,
    height: u8,
}

impl Dimensions {
    pub const MIN: u8 = 3;
    pub const MAX: u8 = 9;

    pub const STANDARD: Dimensions = Dimensions {
        width: 9,
        height: 9,
    };

    /// Returns `None` outside `MIN..=MAX` on either axis.
    pub const fn new(width: u8, height: u8) -> Option<Dimensions> {
        if width < Self::MIN || width > Self::MAX || height < Self::MIN || height > Self::MAX {
            None
        } else {
            Some(Dimensions { width, height })
        }
    }

    #[inline]
    pub const fn width(self) -> u8 {
        self.width
    }

    #[inline]
    pub const fn height(self) -> u8 {
        self.height
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        sq.file >= 1 && sq.file <= self.width && sq.rank >= 1 && sq.rank <= self.height
    }

    /// Row-major cell index, top-left (file = width, rank = 1) first.
    #[inline]
    pub(crate) const fn index(self, sq: Square) -> usize {
        (sq.rank as usize - 1) * self.width as usize + (self.width - sq.file) as usize
    }

    /// Every square, top row first, each row from the highest file down.
    pub fn squares(self) -> impl Iterator<Item = Square> {
        let (width, height) = (self.width, self.height);
        (1..=height).flat_map(move |rank| (1..=width).rev().map(move |file| Square { file, rank }))
    }

    /// Rank counted from the far edge as seen by `color` (1 = last rank).
    #[inline]
    pub const fn relative_rank(self, sq: Square, color: Color) -> u8 {
        match color {
            Color::Black => sq.rank,
            Color::White => self.height + 1 - sq.rank,
        }
    }

    /// Depth of the promotion zone: the far third of the board, at least one rank.
    #[inline]
    pub const fn promotion_zone_depth(self) -> u8 {
        let depth = self.height / 3;
        if depth == 0 { 1 } else { depth }
    }

    #[inline]
    pub const fn in_promotion_zone(self, sq: Square, color: Color) -> bool {
        self.relative_rank(sq, color) <= self.promotion_zone_depth()
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Square on the board, e.g. `7g`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Square from 1-based file and rank. Bounds are checked against the
    /// board with [`Dimensions::contains`].
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Self {
        Square { file, rank }
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Step `distance` times in `dir`, relative to `color`'s orientation.
    ///
    /// Returns `None` when the result leaves the board.
    pub fn step(self, dir: Direction, distance: u8, color: Color, dims: Dimensions) -> Option<Square> {
        let (df, dr) = dir.offset();
        let sign: i16 = match color {
            Color::Black => 1,
            Color::White => -1,
        };
        let d = distance as i16;
        let file = self.file as i16 + df as i16 * d * sign;
        let rank = self.rank as i16 + dr as i16 * d * sign;
        if file < 1 || rank < 1 || file > dims.width() as i16 || rank > dims.height() as i16 {
            return None;
        }
        Some(Square::new(file as u8, rank as u8))
    }

    /// USI形式の段文字（'a'-'i'）
    #[inline]
    pub const fn rank_char(self) -> char {
        // ranks outside the board still format without overflow
        (b'a' - 1).wrapping_add(self.rank) as char
    }
}

/// Display square in shogi notation (e.g., "5e")
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank_char())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid square '{0}': expected a file digit 1-9 followed by a rank letter a-i")]
pub struct ParseSquareError(pub String);

impl FromStr for Square {
    type Err = ParseSquareError;

    /// Parse notation such as "5e" or "1a". Board bounds are not checked here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(f @ '1'..='9'), Some(r @ 'a'..='i'), None) => {
                Ok(Square::new(f as u8 - b'0', r as u8 - b'a' + 1))
            }
            _ => Err(ParseSquareError(s.to_string())),
        }
    }
}

/// Movement directions, relative to the moving side.
///
/// `North` is forward (toward the opponent). East and west are taken from the
/// mover's point of view, so both axes mirror for White.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    /// Knight jump: two forward, one to the east.
    KnightEast,
    /// Knight jump: two forward, one to the west.
    KnightWest,
}

impl Direction {
    pub const ORTHOGONALS: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const DIAGONALS: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// (file delta, rank delta) for Black
    #[inline]
    pub const fn offset(self) -> (i8, i8) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (-1, -1),
            Direction::East => (-1, 0),
            Direction::SouthEast => (-1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (1, 1),
            Direction::West => (1, 0),
            Direction::NorthWest => (1, -1),
            Direction::KnightEast => (-1, -2),
            Direction::KnightWest => (1, -2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_square_parse_and_display() {
        assert_eq!(sq("7g"), Square::new(7, 7));
        assert_eq!(sq("1a").to_string(), "1a");
        assert_eq!(sq("9i").to_string(), "9i");
        assert!("0a".parse::<Square>().is_err());
        assert!("5j".parse::<Square>().is_err());
        assert!("5".parse::<Square>().is_err());
        assert!("5ee".parse::<Square>().is_err());
        assert!("".parse::<Square>().is_err());
    }

    #[test]
    fn test_step_black_orientation() {
        let dims = Dimensions::STANDARD;
        let from = sq("5e");
        assert_eq!(from.step(Direction::North, 1, Color::Black, dims), Some(sq("5d")));
        assert_eq!(from.step(Direction::East, 1, Color::Black, dims), Some(sq("4e")));
        assert_eq!(from.step(Direction::NorthWest, 2, Color::Black, dims), Some(sq("7c")));
        assert_eq!(from.step(Direction::KnightEast, 1, Color::Black, dims), Some(sq("4c")));
        assert_eq!(from.step(Direction::KnightWest, 1, Color::Black, dims), Some(sq("6c")));
    }

    #[test]
    fn test_step_white_is_mirrored() {
        let dims = Dimensions::STANDARD;
        let from = sq("5e");
        assert_eq!(from.step(Direction::North, 1, Color::White, dims), Some(sq("5f")));
        assert_eq!(from.step(Direction::East, 1, Color::White, dims), Some(sq("6e")));
        assert_eq!(from.step(Direction::KnightEast, 1, Color::White, dims), Some(sq("6g")));
    }

    #[test]
    fn test_step_off_board() {
        let dims = Dimensions::STANDARD;
        assert_eq!(sq("1a").step(Direction::North, 1, Color::Black, dims), None);
        assert_eq!(sq("1a").step(Direction::East, 1, Color::Black, dims), None);
        assert_eq!(sq("9i").step(Direction::North, 1, Color::White, dims), None);
        assert_eq!(sq("5b").step(Direction::KnightEast, 1, Color::Black, dims), None);
        assert_eq!(sq("5e").step(Direction::South, 5, Color::Black, dims), None);
    }

    #[test]
    fn test_relative_rank_and_zone() {
        let dims = Dimensions::STANDARD;
        assert_eq!(dims.relative_rank(sq("5a"), Color::Black), 1);
        assert_eq!(dims.relative_rank(sq("5a"), Color::White), 9);
        assert!(dims.in_promotion_zone(sq("2c"), Color::Black));
        assert!(!dims.in_promotion_zone(sq("2d"), Color::Black));
        assert!(dims.in_promotion_zone(sq("8g"), Color::White));
        assert!(!dims.in_promotion_zone(sq("8f"), Color::White));

        let mini = Dimensions::new(5, 5).unwrap();
        assert_eq!(mini.promotion_zone_depth(), 1);
    }

    #[test]
    fn test_dimensions_bounds_and_index() {
        assert!(Dimensions::new(2, 9).is_none());
        assert!(Dimensions::new(9, 10).is_none());
        let dims = Dimensions::STANDARD;
        assert_eq!(dims.index(sq("9a")), 0);
        assert_eq!(dims.index(sq("1a")), 8);
        assert_eq!(dims.index(sq("1i")), 80);
        assert_eq!(dims.squares().count(), 81);
        assert_eq!(dims.squares().next(), Some(sq("9a")));
        assert!(!dims.contains(Square::new(0, 3)));
        assert!(!dims.contains(Square::new(3, 10)));
    }
}
