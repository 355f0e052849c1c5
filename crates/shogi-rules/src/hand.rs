//! 手駒（Hand）

use std::fmt;

use crate::error::InvariantViolation;
use crate::types::PieceKind;

/// A player's captured pieces, counted per droppable kind.
///
/// Counts only change through [`Hand::add`] (capture) and [`Hand::remove`]
/// (drop). A captured piece loses its identity and promotion here; only the
/// kind is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hand {
    counts: [u8; 7],
}

impl Hand {
    pub const EMPTY: Hand = Hand { counts: [0; 7] };

    /// 指定駒種の枚数を取得
    #[inline]
    pub fn count(&self, kind: PieceKind) -> u8 {
        kind.hand_index().map_or(0, |i| self.counts[i])
    }

    /// 指定駒種を持っているか
    #[inline]
    pub fn has(&self, kind: PieceKind) -> bool {
        self.count(kind) > 0
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// 1枚追加
    pub fn add(&mut self, kind: PieceKind) -> Result<(), InvariantViolation> {
        let i = kind.hand_index().ok_or(InvariantViolation::KingCaptured)?;
        self.counts[i] = self.counts[i].saturating_add(1);
        Ok(())
    }

    /// 1枚減らす
    pub fn remove(&mut self, kind: PieceKind) -> Result<(), InvariantViolation> {
        let i = kind.hand_index().ok_or(InvariantViolation::HandUnderflow(kind))?;
        if self.counts[i] == 0 {
            return Err(InvariantViolation::HandUnderflow(kind));
        }
        self.counts[i] -= 1;
        Ok(())
    }

    /// Kinds with a non-zero count, in [`PieceKind::HAND`] order.
    pub fn kinds(&self) -> impl Iterator<Item = PieceKind> + '_ {
        PieceKind::HAND.into_iter().filter(|&k| self.has(k))
    }
}

/// `R B G2 P3`, or `-` when empty
impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        let mut first = true;
        for kind in self.kinds() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            match self.count(kind) {
                1 => write!(f, "{}", kind.to_char())?,
                n => write!(f, "{}{}", kind.to_char(), n)?,
            }
        }
        Ok(())
    }
}
