//! Selection controller
//!
//! The click-driven state machine that sits between a board UI and a rule
//! engine. It owns every piece of per-game state (selection, tracked turn,
//! move ledger, captures, status) plus the persisted stats, and keeps the
//! [`BoardView`] in step with the engine's snapshots.
//!
//! # Lifecycle
//!
//! 1. Build with [`SelectionController::new`], attaching an engine through
//!    the [`EngineBridge`].
//! 2. [`SelectionController::start_new_game`] begins a game on the engine.
//! 3. The host forwards clicks to [`SelectionController::click`] and, when
//!    a promotion is pending, the user's choice to
//!    [`SelectionController::choose_promotion`].
//! 4. The host calls [`SelectionController::process_engine_updates`] to
//!    apply queued engine callbacks.
//!
//! Input handling lives in [`input`], engine updates in [`sync`].

pub mod input;
pub mod sync;

pub use input::ClickOutcome;

use crate::core::config::{CaptureSource, ControllerConfig};
use crate::core::storage::KeyValueStore;
use crate::game::board_state::Board;
use crate::game::resources::engine::{EngineBridge, RuleEngine};
use crate::game::resources::{
    CapturedPieces, CurrentTurn, GameStatus, MoveHistory, NoticeBoard, NoticeKind,
    SelectionState, Stats, StatsStore, StatusReport,
};
use crate::rendering::board::BoardView;
use std::collections::VecDeque;
use tracing::{debug, info};
use web_time::{Duration, Instant};

pub const NEW_GAME_NOTICE: &str = "New game started!";
pub const INVALID_MOVE_NOTICE: &str = "Invalid move!";

/// Submitted moves tracked while waiting for the engine to echo them
pub const MAX_PENDING_MOVES: usize = 16;

pub struct SelectionController {
    config: ControllerConfig,
    bridge: EngineBridge,
    view: BoardView,
    selection: SelectionState,
    turn: CurrentTurn,
    history: MoveHistory,
    captured: CapturedPieces,
    status: StatusReport,
    active: bool,
    stats: StatsStore,
    notices: NoticeBoard,
    /// Notations submitted but not yet confirmed by a board snapshot
    pending: VecDeque<String>,
    /// Whether a snapshot of this game has been seen to diff captures against
    baseline_confirmed: bool,
}

impl std::fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionController")
            .field("active", &self.active)
            .field("selection", &self.selection)
            .field("turn", &self.turn)
            .field("status", &self.status)
            .field("bridge", &self.bridge)
            .finish()
    }
}

impl SelectionController {
    /// Build a controller, loading stats from `store`
    pub fn new(
        config: ControllerConfig,
        bridge: EngineBridge,
        store: Box<dyn KeyValueStore>,
    ) -> Self {
        let stats = StatsStore::load(store, config.stats_key.clone());
        let notices = NoticeBoard::new(Duration::from_millis(config.notice_millis));
        let mut view = BoardView::new();
        view.repaint(&Board::standard());

        Self {
            config,
            bridge,
            view,
            selection: SelectionState::Idle,
            turn: CurrentTurn::default(),
            history: MoveHistory::default(),
            captured: CapturedPieces::default(),
            status: StatusReport::default(),
            active: false,
            stats,
            notices,
            pending: VecDeque::new(),
            baseline_confirmed: false,
        }
    }

    /// Attach an engine after construction
    pub fn attach_engine(&mut self, engine: Box<dyn RuleEngine>) {
        self.bridge.attach(engine);
    }

    /// Start a game on the engine; `None` uses the configured difficulty
    ///
    /// Returns `false` without touching any state when no engine is attached.
    pub fn start_new_game(&mut self, difficulty: Option<u8>) -> bool {
        if !self.bridge.is_available() {
            debug!("[GAME] New game requested without an engine");
            return false;
        }
        let difficulty =
            ControllerConfig::clamp_difficulty(difficulty.unwrap_or(self.config.difficulty));

        // A result still queued from the previous game must be counted.
        let stale = self.process_engine_updates();
        if stale > 0 {
            debug!("[GAME] Applied {} updates from the previous game", stale);
        }
        self.clear_game_state();
        self.active = true;
        self.status = StatusReport::new(GameStatus::Playing, None);

        let (human_white, human_black) = (self.config.human_white, self.config.human_black);
        if let Err(e) = self.bridge.begin_game(human_white, human_black, difficulty) {
            debug!("[GAME] Engine refused new game: {}", e);
        }

        info!("[GAME] New game started at difficulty {}", difficulty);
        self.notices.post(NEW_GAME_NOTICE, NoticeKind::Success);
        true
    }

    /// Resign the active game on behalf of the side to move
    pub fn resign(&mut self) -> bool {
        if !self.active {
            debug!("[GAME] Resign ignored: no active game");
            return false;
        }
        if let Err(e) = self.bridge.resign() {
            debug!("[GAME] Resign ignored: {}", e);
            return false;
        }
        let winner = self.turn.color.opponent();
        info!("[GAME] {} resigned", self.turn.color);
        self.end_game(StatusReport::new(GameStatus::Resigned, Some(winner)));
        true
    }

    /// Return to the pre-game state; stats are kept
    pub fn reset(&mut self) {
        if let Err(e) = self.bridge.reset_game() {
            debug!("[GAME] Engine reset skipped: {}", e);
        }
        self.clear_game_state();
        self.active = false;
        self.status = StatusReport::default();
        info!("[GAME] Reset");
    }

    fn clear_game_state(&mut self) {
        self.selection.clear();
        self.turn = CurrentTurn::default();
        self.history.clear();
        self.captured.clear();
        self.pending.clear();
        self.baseline_confirmed = false;
        self.view.clear_decorations();
        self.view.repaint(&Board::standard());
    }

    /// Finish the game once: stats and result notice
    fn end_game(&mut self, report: StatusReport) {
        self.active = false;
        self.selection.clear();
        self.view.clear_decorations();
        self.stats.record(&report);
        let message = report
            .result_message()
            .unwrap_or_else(|| report.status.text().to_string());
        info!("[GAME] Game over: {}", message);
        self.notices.post(message, NoticeKind::Info);
        self.status = report;
    }

    /// Drop notices that have outlived their lifetime
    pub fn expire_notices(&mut self, now: Instant) {
        self.notices.expire(now);
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn capture_source(&self) -> CaptureSource {
        self.config.capture_source
    }

    pub fn is_engine_available(&self) -> bool {
        self.bridge.is_available()
    }

    /// Whether clicks are currently accepted
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn turn(&self) -> &CurrentTurn {
        &self.turn
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn captured(&self) -> &CapturedPieces {
        &self.captured
    }

    pub fn status(&self) -> &StatusReport {
        &self.status
    }

    pub fn stats(&self) -> Stats {
        self.stats.stats()
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// Moves submitted but not yet echoed back by the engine
    pub fn unconfirmed_moves(&self) -> usize {
        self.pending.len()
    }

    /// "White to move" / "Black to move"
    pub fn turn_text(&self) -> String {
        self.turn.text()
    }

    pub fn status_text(&self) -> &'static str {
        self.status.status.text()
    }

    /// Move list as numbered lines, "1. e2-e4"
    pub fn move_list(&self) -> Vec<String> {
        self.history.numbered_lines()
    }
}
