//! 対局管理
//!
//! A [`Game`] owns the board, both players, the move log and the observer.
//! Every accepted action runs the turn pipeline for the next player:
//!
//! 1. refresh piece caches from the grid
//! 2. rebuild raw move and drop tables
//! 3. detect check
//! 4. in check: keep only evasions, then test for checkmate
//! 5. drop every candidate that leaves the own King attacked
//! 6. publish the tables, or end the game when nothing is legal
//!
//! - `execute` - move and drop executors

mod execute;

use std::fmt;

use log::{debug, warn};

use crate::action::Action;
use crate::board::Board;
use crate::check;
use crate::config::{ConfigError, GameConfig};
use crate::error::{ActionError, InvariantViolation};
use crate::hand::Hand;
use crate::layout::Layout;
use crate::movegen::SquareSet;
use crate::observer::{GameObserver, LogObserver};
use crate::player::Player;
use crate::record::MoveRecord;
use crate::snapshot::{self, BoardSnapshot};
use crate::types::{Color, PieceKind, Square};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnState {
    AwaitingAction,
    /// An action was applied and the next turn is being prepared
    TurnEnded,
    GameOver,
}

impl TurnState {
    pub const fn label(self) -> &'static str {
        match self {
            TurnState::AwaitingAction => "awaiting_action",
            TurnState::TurnEnded => "turn_ended",
            TurnState::GameOver => "game_over",
        }
    }
}

/// How the game ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    /// 投了
    Surrender { winner: Color },
    /// The side to move had no legal move or drop without being in check.
    NoLegalMoves { winner: Color },
    /// A rules invariant broke and the session cannot continue.
    Aborted(InvariantViolation),
}

impl Outcome {
    pub fn winner(&self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner }
            | Outcome::Surrender { winner }
            | Outcome::NoLegalMoves { winner } => Some(*winner),
            Outcome::Aborted(_) => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Checkmate { .. } => "checkmate",
            Outcome::Surrender { .. } => "surrender",
            Outcome::NoLegalMoves { .. } => "no_legal_moves",
            Outcome::Aborted(_) => "aborted",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "{winner} wins by checkmate"),
            Outcome::Surrender { winner } => write!(f, "{winner} wins by resignation"),
            Outcome::NoLegalMoves { winner } => {
                write!(f, "{winner} wins, {} has no legal moves", winner.opponent())
            }
            Outcome::Aborted(violation) => write!(f, "aborted: {violation}"),
        }
    }
}

/// Where a piece would come from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Board(Square),
    Hand(PieceKind),
}

/// Result of an accepted action
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    /// Log entry for a move or drop
    pub record: Option<MoveRecord>,
    /// Side to move after the action
    pub next: Color,
    pub in_check: bool,
    /// Set once the game is over
    pub outcome: Option<Outcome>,
}

pub struct Game {
    initial: Layout,
    record_moves: bool,
    board: Board,
    players: [Player; Color::NUM],
    side_to_move: Color,
    state: TurnState,
    outcome: Option<Outcome>,
    log: Vec<MoveRecord>,
    ply: usize,
    observer: Box<dyn GameObserver>,
}

impl Game {
    /// Start from `layout`, reporting events to the `log` facade.
    pub fn new(layout: Layout) -> Self {
        Self::with_observer(layout, Box::new(LogObserver))
    }

    /// 平手で開始
    pub fn standard() -> Self {
        Self::new(Layout::standard())
    }

    pub fn with_observer(layout: Layout, observer: Box<dyn GameObserver>) -> Self {
        let mut game = Game {
            board: layout.board.clone(),
            players: [
                Player::new(Color::Black, layout.hands[Color::Black.index()]),
                Player::new(Color::White, layout.hands[Color::White.index()]),
            ],
            side_to_move: layout.side_to_move,
            initial: layout,
            record_moves: true,
            state: TurnState::TurnEnded,
            outcome: None,
            log: Vec::new(),
            ply: 0,
            observer,
        };
        game.begin_turn();
        game
    }

    pub fn from_config(config: &GameConfig, observer: Box<dyn GameObserver>) -> Result<Self, ConfigError> {
        let layout = config.load_layout()?;
        let mut game = Self::with_observer(layout, observer);
        game.record_moves = config.record_moves;
        Ok(game)
    }

    /// Apply one action for `actor`.
    ///
    /// A rejected action leaves the game untouched, except that an invariant
    /// violation ends the game with [`Outcome::Aborted`].
    pub fn apply_action(&mut self, actor: Color, action: Action) -> Result<TurnReport, ActionError> {
        let result = self.dispatch(actor, action);
        if let Err(error) = &result {
            if let ActionError::Invariant(violation) = error {
                self.abort(violation.clone());
            }
            self.observer.on_action_rejected(actor, error);
        }
        result
    }

    /// Parse and apply an action string. Returns the side to move afterwards.
    pub fn submit(&mut self, actor: Color, text: &str) -> Result<Color, ActionError> {
        let action = match text.parse::<Action>() {
            Ok(action) => action,
            Err(e) => {
                let error = ActionError::from(e);
                self.observer.on_action_rejected(actor, &error);
                return Err(error);
            }
        };
        self.apply_action(actor, action)?;
        Ok(self.side_to_move)
    }

    fn dispatch(&mut self, actor: Color, action: Action) -> Result<TurnReport, ActionError> {
        let record = match action {
            Action::Restart => {
                self.restart();
                return Ok(self.report(None));
            }
            Action::Surrender => {
                // Resigning a finished game changes nothing.
                if self.state != TurnState::GameOver {
                    self.finish(Outcome::Surrender {
                        winner: actor.opponent(),
                    });
                }
                return Ok(self.report(None));
            }
            Action::Move { from, to, promote } => {
                self.ensure_turn(actor)?;
                self.execute_move(from, to, promote)?
            }
            Action::Drop { kind, to } => {
                self.ensure_turn(actor)?;
                self.execute_drop(kind, to)?
            }
        };

        self.observer.on_action_applied(&record);
        if self.record_moves {
            self.log.push(record.clone());
        }
        self.ply += 1;
        self.state = TurnState::TurnEnded;
        self.side_to_move = actor.opponent();
        self.begin_turn();
        Ok(self.report(Some(record)))
    }

    fn ensure_turn(&self, actor: Color) -> Result<(), ActionError> {
        if self.state != TurnState::AwaitingAction {
            return Err(ActionError::GameOver);
        }
        if actor != self.side_to_move {
            return Err(ActionError::NotYourTurn(actor));
        }
        Ok(())
    }

    /// Discard the whole game and start again from the initial layout.
    pub fn restart(&mut self) {
        self.board = self.initial.board.clone();
        self.players = [
            Player::new(Color::Black, self.initial.hands[Color::Black.index()]),
            Player::new(Color::White, self.initial.hands[Color::White.index()]),
        ];
        self.side_to_move = self.initial.side_to_move;
        self.state = TurnState::TurnEnded;
        self.outcome = None;
        self.log.clear();
        self.ply = 0;
        self.observer.on_restart();
        self.begin_turn();
    }

    fn begin_turn(&mut self) {
        if let Err(violation) = self.prepare_turn() {
            self.abort(violation);
        }
    }

    fn prepare_turn(&mut self) -> Result<(), InvariantViolation> {
        let color = self.side_to_move;
        self.board.validate()?;

        let hands: [Hand; Color::NUM] = [*self.players[0].hand(), *self.players[1].hand()];
        for player in &mut self.players {
            player.clear_tables();
            player.refresh_pieces(&self.board);
            player.compute_tables(&mut self.board, &hands)?;
        }

        let checkers = check::checkers(&self.board, color)?;
        let in_check = !checkers.is_empty();
        let mover = &mut self.players[color.index()];
        if in_check {
            let king = self.board.king_square(color)?;
            let (targets, blocks) = match checkers.as_slice() {
                [checker] => {
                    let blocks = check::squares_between(&self.board, *checker, king);
                    let mut targets = blocks.clone();
                    targets.insert(*checker);
                    (targets, blocks)
                }
                _ => (SquareSet::new(), SquareSet::new()),
            };
            mover.restrict_to_evasions(king, &targets, &blocks);
        }
        mover.retain_safe(&mut self.board)?;

        let checkmated = in_check && check::is_checkmate(&mut self.board, &hands[color.index()], color)?;
        mover.set_check_state(in_check, checkmated);
        let has_action = mover.has_any_action();
        let action_count = mover.action_count();
        debug!(
            "ply {}: {color} to move, in_check={in_check}, {action_count} legal actions",
            self.ply
        );

        if in_check {
            self.observer.on_check(color);
        }
        if checkmated {
            self.finish(Outcome::Checkmate {
                winner: color.opponent(),
            });
        } else if !has_action {
            self.finish(Outcome::NoLegalMoves {
                winner: color.opponent(),
            });
        } else {
            self.state = TurnState::AwaitingAction;
            self.observer.on_turn_started(color, action_count);
        }
        Ok(())
    }

    fn finish(&mut self, outcome: Outcome) {
        self.state = TurnState::GameOver;
        self.observer.on_game_over(&outcome);
        self.outcome = Some(outcome);
    }

    fn abort(&mut self, violation: InvariantViolation) {
        warn!("Aborting game: {violation}");
        self.finish(Outcome::Aborted(violation));
    }

    fn report(&self, record: Option<MoveRecord>) -> TurnReport {
        TurnReport {
            record,
            next: self.side_to_move,
            in_check: self.current_player().in_check(),
            outcome: self.outcome.clone(),
        }
    }

    /// Legal destinations for the side to move. Empty for anything else,
    /// including after the game has ended.
    pub fn legal_destinations(&self, origin: Origin) -> SquareSet {
        if self.state != TurnState::AwaitingAction {
            return SquareSet::new();
        }
        let player = self.current_player();
        let found = match origin {
            Origin::Board(from) => player.moves_from(from),
            Origin::Hand(kind) => player.drops_of(kind),
        };
        found.cloned().unwrap_or_default()
    }

    /// Every legal action for the side to move, moves first.
    ///
    /// A move that may promote appears twice, with and without `+`; a move
    /// that must promote appears only with it.
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.state != TurnState::AwaitingAction {
            return Vec::new();
        }
        let player = self.current_player();
        let mut actions = Vec::new();
        for (&from, dests) in player.moves() {
            for &to in dests {
                let (may, must) = self.promotion_options(from, to);
                if !must {
                    actions.push(Action::Move {
                        from,
                        to,
                        promote: false,
                    });
                }
                if may {
                    actions.push(Action::Move {
                        from,
                        to,
                        promote: true,
                    });
                }
            }
        }
        for (&kind, squares) in player.drops() {
            actions.extend(squares.iter().map(|&to| Action::Drop { kind, to }));
        }
        actions
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.state == TurnState::GameOver
    }

    pub fn winner(&self) -> Option<Color> {
        self.outcome.as_ref().and_then(Outcome::winner)
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    #[inline]
    pub fn state(&self) -> TurnState {
        self.state
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    fn current_player(&self) -> &Player {
        self.player(self.side_to_move)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn move_log(&self) -> &[MoveRecord] {
        &self.log
    }

    /// Number of accepted moves and drops since the start or last restart
    pub fn ply(&self) -> usize {
        self.ply
    }

    /// Current position as a layout, e.g. for saving a test case.
    pub fn to_layout(&self) -> Layout {
        Layout {
            board: self.board.clone(),
            hands: [*self.players[0].hand(), *self.players[1].hand()],
            side_to_move: self.side_to_move,
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let dims = self.board.dims();
        BoardSnapshot {
            width: dims.width(),
            height: dims.height(),
            cells: snapshot::cells(&self.board),
            hands: snapshot::hands(&[*self.players[0].hand(), *self.players[1].hand()]),
            turn: self.side_to_move.label().to_string(),
            state: self.state.label().to_string(),
            in_check: self.current_player().in_check(),
            winner: self.winner().map(|c| c.label().to_string()),
            outcome: self.outcome.as_ref().map(|o| o.label().to_string()),
            ply: self.ply,
        }
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("side_to_move", &self.side_to_move)
            .field("state", &self.state)
            .field("outcome", &self.outcome)
            .field("ply", &self.ply)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NullObserver;
    use std::sync::{Arc, Mutex};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn quiet(layout: Layout) -> Game {
        Game::with_observer(layout, Box::new(NullObserver))
    }

    #[test]
    fn test_opening_state() {
        let game = quiet(Layout::standard());
        assert_eq!(game.state(), TurnState::AwaitingAction);
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.legal_actions().len(), 30);
        assert_eq!(
            game.legal_destinations(Origin::Board(sq("2g"))),
            SquareSet::from([sq("2f")])
        );
        // White's pieces are not the side to move.
        assert!(game.legal_destinations(Origin::Board(sq("3c"))).is_empty());
        assert!(game.legal_destinations(Origin::Hand(PieceKind::Pawn)).is_empty());
    }

    #[test]
    fn test_turn_alternates() {
        let mut game = quiet(Layout::standard());
        assert_eq!(game.submit(Color::Black, "7g7f"), Ok(Color::White));
        assert_eq!(game.submit(Color::Black, "2g2f"), Err(ActionError::NotYourTurn(Color::Black)));
        assert_eq!(game.submit(Color::White, "3c3d"), Ok(Color::Black));
        assert_eq!(game.ply(), 2);
        let log: Vec<String> = game.move_log().iter().map(|r| r.to_string()).collect();
        assert_eq!(log, vec!["Black P7g-7f", "White P3c-3d"]);
    }

    #[test]
    fn test_rejected_action_changes_nothing() {
        let mut game = quiet(Layout::standard());
        let before = game.snapshot();
        assert_eq!(
            game.submit(Color::Black, "7g7e"),
            Err(ActionError::IllegalMove {
                from: sq("7g"),
                to: sq("7e")
            })
        );
        assert!(matches!(game.submit(Color::Black, "7g"), Err(ActionError::Malformed(_))));
        assert_eq!(game.submit(Color::Black, "5e5d"), Err(ActionError::NoPiece(sq("5e"))));
        assert_eq!(game.submit(Color::Black, "P*5e"), Err(ActionError::EmptyHand(PieceKind::Pawn)));
        assert_eq!(game.snapshot(), before);
        assert!(game.move_log().is_empty());
    }

    #[test]
    fn test_surrender_and_restart() {
        let mut game = quiet(Layout::standard());
        game.submit(Color::Black, "7g7f").unwrap();
        let report = game.apply_action(Color::Black, Action::Surrender).unwrap();
        assert_eq!(report.outcome, Some(Outcome::Surrender { winner: Color::White }));
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(Color::White));
        assert_eq!(game.submit(Color::White, "3c3d"), Err(ActionError::GameOver));

        game.apply_action(Color::White, Action::Restart).unwrap();
        assert!(!game.is_game_over());
        assert_eq!(game.winner(), None);
        assert_eq!(game.side_to_move(), Color::Black);
        assert!(game.move_log().is_empty());
        assert_eq!(game.board(), &Board::standard());
    }

    #[test]
    fn test_record_moves_disabled() {
        let config = GameConfig {
            record_moves: false,
            ..GameConfig::default()
        };
        let mut game = Game::from_config(&config, Box::new(NullObserver)).unwrap();
        game.submit(Color::Black, "7g7f").unwrap();
        assert!(game.move_log().is_empty());
        assert_eq!(game.ply(), 1);
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl GameObserver for Recorder {
        fn on_action_applied(&mut self, record: &MoveRecord) {
            self.0.lock().unwrap().push(format!("applied {record}"));
        }
        fn on_action_rejected(&mut self, actor: Color, _error: &ActionError) {
            self.0.lock().unwrap().push(format!("rejected {actor}"));
        }
        fn on_game_over(&mut self, outcome: &Outcome) {
            self.0.lock().unwrap().push(format!("over {}", outcome.label()));
        }
        fn on_restart(&mut self) {
            self.0.lock().unwrap().push("restart".to_string());
        }
    }

    #[test]
    fn test_observer_events() {
        let recorder = Recorder::default();
        let events = recorder.0.clone();
        let mut game = Game::with_observer(Layout::standard(), Box::new(recorder));
        game.submit(Color::Black, "7g7f").unwrap();
        let _ = game.submit(Color::Black, "7f7e");
        game.submit(Color::White, "resign").unwrap();
        game.submit(Color::White, "restart").unwrap();
        assert_eq!(
            *events.lock().unwrap(),
            vec!["applied Black P7g-7f", "rejected Black", "over surrender", "restart"]
        );
    }

    #[test]
    fn test_snapshot_fields() {
        let game = quiet(Layout::standard());
        let snap = game.snapshot();
        assert_eq!((snap.width, snap.height), (9, 9));
        assert_eq!(snap.turn, "black");
        assert_eq!(snap.state, "awaiting_action");
        assert!(!snap.in_check);
        assert_eq!(snap.winner, None);
    }
}
