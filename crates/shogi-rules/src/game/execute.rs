//! 指し手・駒打ちの実行
//!
//! Executors validate against the published tables first and only then
//! mutate, so a rejected action leaves the board and hands as they were.

use super::Game;
use crate::error::{ActionError, InvariantViolation};
use crate::movegen::is_stranded;
use crate::record::{Location, MoveRecord};
use crate::types::{Piece, PieceKind, Square};

impl Game {
    /// `(may, must)` promote for the piece on `from` moving to `to`.
    pub(super) fn promotion_options(&self, from: Square, to: Square) -> (bool, bool) {
        let Some(piece) = self.board.piece_on(from) else {
            return (false, false);
        };
        if piece.promoted || !piece.kind.can_promote() {
            return (false, false);
        }
        let dims = self.board.dims();
        let color = piece.color;
        let must = is_stranded(dims, to, color, piece.kind);
        let may = must || dims.in_promotion_zone(from, color) || dims.in_promotion_zone(to, color);
        (may, must)
    }

    pub(super) fn execute_move(
        &mut self,
        from: Square,
        to: Square,
        promote: bool,
    ) -> Result<MoveRecord, ActionError> {
        let color = self.side_to_move;
        let piece = self
            .board
            .piece_on(from)
            .filter(|p| p.color == color)
            .ok_or(ActionError::NoPiece(from))?;
        if !self.players[color.index()].can_move(from, to) {
            return Err(ActionError::IllegalMove { from, to });
        }

        // 成れない駒・成れない位置での成り指定は無視する
        let (may, must) = self.promotion_options(from, to);
        let promoted = must || (promote && may);

        let captured = self.board.piece_on(to);
        if let Some(victim) = captured {
            if victim.is_king() {
                return Err(InvariantViolation::KingCaptured.into());
            }
            // 取った駒は成りを解除して持ち駒へ
            self.players[color.index()].hand_mut().add(victim.kind)?;
        }

        self.board.remove_piece(from)?;
        let placed = if promoted { piece.promote() } else { piece };
        self.board.put_piece(to, placed)?;

        Ok(MoveRecord {
            mover: color,
            piece,
            from: Location::Board(from),
            to,
            captured,
            promoted,
        })
    }

    pub(super) fn execute_drop(&mut self, kind: PieceKind, to: Square) -> Result<MoveRecord, ActionError> {
        let color = self.side_to_move;
        let player = &self.players[color.index()];
        if !player.hand().has(kind) {
            return Err(ActionError::EmptyHand(kind));
        }
        if !player.can_drop(kind, to) || !self.board.is_empty_square(to) {
            return Err(ActionError::IllegalDrop { kind, to });
        }

        self.players[color.index()].hand_mut().remove(kind)?;
        let piece = Piece::new(kind, color);
        self.board.put_piece(to, piece)?;

        Ok(MoveRecord {
            mover: color,
            piece,
            from: Location::Hand,
            to,
            captured: None,
            promoted: false,
        })
    }
}
