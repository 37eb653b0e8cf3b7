//! Shared test helpers: a scripted rule engine and controller builders
#![allow(dead_code)]

use chess_controller::core::{CaptureSource, ControllerConfig, MemoryStore};
use chess_controller::game::board_state::Board;
use chess_controller::game::resources::engine::{wire, EngineBridge, EngineCallback, RuleEngine};
use chess_controller::game::types::{Color, Move, Piece, PieceKind, Position};
use chess_controller::game::SelectionController;
use parking_lot::Mutex;
use std::sync::Arc;

pub fn pos(s: &str) -> Position {
    Position::from_algebraic(s).unwrap()
}

#[derive(Default)]
struct Script {
    legal: Vec<(Position, Position)>,
    calls: Vec<String>,
    board: Board,
    turn: Color,
    echo: bool,
    board_callback: Option<EngineCallback>,
    status_callback: Option<EngineCallback>,
}

/// Test-side handle to a [`ScriptedEngine`]
///
/// The engine answers legality from an explicit allow-list, records every
/// call, and only fires callbacks when told to (or, with echo enabled,
/// after each submitted move).
#[derive(Clone, Default)]
pub struct EngineHandle(Arc<Mutex<Script>>);

struct ScriptedEngine(EngineHandle);

impl EngineHandle {
    pub fn new() -> Self {
        let handle = Self::default();
        handle.0.lock().board = Board::standard();
        handle
    }

    pub fn engine(&self) -> Box<dyn RuleEngine> {
        Box::new(ScriptedEngine(self.clone()))
    }

    pub fn allow(&self, from: &str, to: &str) -> &Self {
        self.0.lock().legal.push((pos(from), pos(to)));
        self
    }

    /// Apply submitted moves to the engine board and publish it
    pub fn echo_moves(&self) -> &Self {
        self.0.lock().echo = true;
        self
    }

    pub fn set_board(&self, board: Board) {
        self.0.lock().board = board;
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().calls.clone()
    }

    pub fn emit_board(&self, json: &str) {
        let script = self.0.lock();
        if let Some(cb) = &script.board_callback {
            cb(json.to_string());
        }
    }

    pub fn emit_status(&self, json: &str) {
        let script = self.0.lock();
        if let Some(cb) = &script.status_callback {
            cb(json.to_string());
        }
    }

    /// Publish the engine's current board, turn and `last_move`
    pub fn publish(&self, last_move: Option<&str>) {
        let script = self.0.lock();
        let json = wire::encode_board(&script.board, Some(script.turn), last_move);
        if let Some(cb) = &script.board_callback {
            cb(json);
        }
    }

    /// Whether the bridge registered both callbacks
    pub fn has_callbacks(&self) -> bool {
        let script = self.0.lock();
        script.board_callback.is_some() && script.status_callback.is_some()
    }
}

impl RuleEngine for ScriptedEngine {
    fn legal_destinations(&self, from: &str) -> String {
        let mut script = self.0 .0.lock();
        script.calls.push(format!("legal_destinations {from}"));
        let targets: Vec<Position> = script
            .legal
            .iter()
            .filter(|(f, _)| f.to_algebraic() == from)
            .map(|(_, t)| *t)
            .collect();
        wire::encode_destinations(&targets)
    }

    fn is_legal(&self, from: &str, to: &str) -> bool {
        let mut script = self.0 .0.lock();
        script.calls.push(format!("is_legal {from} {to}"));
        script
            .legal
            .iter()
            .any(|(f, t)| f.to_algebraic() == from && t.to_algebraic() == to)
    }

    fn submit_move(&mut self, from: &str, to: &str, promotion: &str) {
        let mut script = self.0 .0.lock();
        script.calls.push(format!("submit_move {from} {to} {promotion}"));
        if !script.echo {
            return;
        }

        let (from, to) = (pos(from), pos(to));
        let Some(piece) = script.board.piece_at(from) else {
            return;
        };
        let mut mv = Move::new(from, to);
        let landed = match promotion.chars().next().and_then(PieceKind::from_letter) {
            Some(kind) => {
                mv = mv.with_promotion(kind);
                Piece::new(kind, piece.color)
            }
            None => piece,
        };
        script.board.set(from, None);
        script.board.set(to, Some(landed));
        script.turn = script.turn.opponent();

        let json = wire::encode_board(&script.board, Some(script.turn), Some(&mv.notation()));
        if let Some(cb) = &script.board_callback {
            cb(json);
        }
    }

    fn begin_game(&mut self, human_white: bool, human_black: bool, difficulty: u8) {
        let mut script = self.0 .0.lock();
        script
            .calls
            .push(format!("begin_game {human_white} {human_black} {difficulty}"));
    }

    fn resign(&mut self) {
        self.0 .0.lock().calls.push("resign".to_string());
    }

    fn reset_game(&mut self) {
        self.0 .0.lock().calls.push("reset_game".to_string());
    }

    fn register_board_callback(&mut self, callback: EngineCallback) {
        self.0 .0.lock().board_callback = Some(callback);
    }

    fn register_status_callback(&mut self, callback: EngineCallback) {
        self.0 .0.lock().status_callback = Some(callback);
    }
}

pub fn config_with(capture_source: CaptureSource) -> ControllerConfig {
    ControllerConfig {
        capture_source,
        ..ControllerConfig::default()
    }
}

/// Controller wired to a scripted engine and an in-memory store
pub fn controller_with(
    config: ControllerConfig,
) -> (SelectionController, EngineHandle, MemoryStore) {
    let handle = EngineHandle::new();
    let store = MemoryStore::new();
    let controller = SelectionController::new(
        config,
        EngineBridge::new(handle.engine()),
        Box::new(store.clone()),
    );
    (controller, handle, store)
}

/// Controller with a game already started
pub fn started(config: ControllerConfig) -> (SelectionController, EngineHandle, MemoryStore) {
    let (mut controller, handle, store) = controller_with(config);
    assert!(controller.start_new_game(None), "engine is attached");
    (controller, handle, store)
}

/// Board with only the given pieces
pub fn board_of(pieces: &[(&str, char)]) -> Board {
    let mut board = Board::empty();
    for (square, symbol) in pieces {
        board.set(pos(square), Piece::from_symbol(*symbol));
    }
    board
}
