//! Game event hooks
//!
//! A [`crate::game::Game`] reports what happens to an injected observer
//! instead of printing. All hooks default to doing nothing.

use log::{debug, info, warn};

use crate::error::ActionError;
use crate::game::Outcome;
use crate::record::MoveRecord;
use crate::types::Color;

pub trait GameObserver: Send {
    /// Tables for `color` are published and the game waits for its action.
    fn on_turn_started(&mut self, _color: Color, _legal_actions: usize) {}

    fn on_action_applied(&mut self, _record: &MoveRecord) {}

    fn on_action_rejected(&mut self, _actor: Color, _error: &ActionError) {}

    /// `color` is in check at the start of its turn.
    fn on_check(&mut self, _color: Color) {}

    fn on_game_over(&mut self, _outcome: &Outcome) {}

    fn on_restart(&mut self) {}
}

/// Forwards every event to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl GameObserver for LogObserver {
    fn on_turn_started(&mut self, color: Color, legal_actions: usize) {
        debug!("{color} to move ({legal_actions} legal actions)");
    }

    fn on_action_applied(&mut self, record: &MoveRecord) {
        info!("{record}");
    }

    fn on_action_rejected(&mut self, actor: Color, error: &ActionError) {
        if error.is_fatal() {
            warn!("{actor}: {error}");
        } else {
            debug!("{actor}: rejected: {error}");
        }
    }

    fn on_check(&mut self, color: Color) {
        info!("{color} is in check");
    }

    fn on_game_over(&mut self, outcome: &Outcome) {
        info!("Game over: {outcome}");
    }

    fn on_restart(&mut self) {
        info!("Game restarted");
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl GameObserver for NullObserver {}
