//! Bridge between the controller and an external rule engine
//!
//! The engine owns the authoritative position and move legality. It pushes
//! board and status updates through callbacks that may fire on any thread,
//! so the bridge turns each callback into a message on a crossbeam channel.
//! The controller drains the channel on its own thread, in arrival order.
//!
//! An unattached bridge behaves as if the engine were absent: queries
//! return nothing and commands report [`GameError::EngineUnavailable`].

use super::wire::{self, BoardSnapshot};
use crate::game::error::{GameError, GameResult};
use crate::game::resources::game_over::StatusReport;
use crate::game::types::{Move, Position};
use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, info, warn};

/// Callback the engine invokes with a JSON payload
pub type EngineCallback = Box<dyn Fn(String) + Send + Sync>;

/// Operations the controller needs from a rule engine
///
/// Squares are algebraic strings ("e2"), promotion is "" or one of
/// "q", "r", "b", "n".
pub trait RuleEngine: Send + Sync {
    /// JSON array of destination squares for the piece on `from`
    fn legal_destinations(&self, from: &str) -> String;

    fn is_legal(&self, from: &str, to: &str) -> bool;

    fn submit_move(&mut self, from: &str, to: &str, promotion: &str);

    fn begin_game(&mut self, human_white: bool, human_black: bool, difficulty: u8);

    fn resign(&mut self);

    fn reset_game(&mut self);

    fn register_board_callback(&mut self, callback: EngineCallback);

    fn register_status_callback(&mut self, callback: EngineCallback);
}

/// Raw payload as delivered by a callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawUpdate {
    Board(String),
    Status(String),
}

/// Decoded engine update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineUpdate {
    Board(BoardSnapshot),
    Status(StatusReport),
    /// Payload without a board, sent when the engine resets
    Cleared,
}

pub struct EngineBridge {
    engine: Option<Box<dyn RuleEngine>>,
    sender: Sender<RawUpdate>,
    receiver: Receiver<RawUpdate>,
}

impl std::fmt::Debug for EngineBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineBridge")
            .field("available", &self.is_available())
            .field("queued", &self.receiver.len())
            .finish()
    }
}

impl Default for EngineBridge {
    fn default() -> Self {
        Self::unavailable()
    }
}

impl EngineBridge {
    /// Bridge with no engine attached
    pub fn unavailable() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            engine: None,
            sender,
            receiver,
        }
    }

    pub fn new(engine: Box<dyn RuleEngine>) -> Self {
        let mut bridge = Self::unavailable();
        bridge.attach(engine);
        bridge
    }

    /// Attach an engine and route its callbacks into the update queue
    pub fn attach(&mut self, mut engine: Box<dyn RuleEngine>) {
        let board_tx = self.sender.clone();
        engine.register_board_callback(Box::new(move |json| {
            // Receiver lives as long as the bridge; a failed send means it is gone.
            let _ = board_tx.send(RawUpdate::Board(json));
        }));
        let status_tx = self.sender.clone();
        engine.register_status_callback(Box::new(move |json| {
            let _ = status_tx.send(RawUpdate::Status(json));
        }));
        info!("[ENGINE] Rule engine attached");
        self.engine = Some(engine);
    }

    pub fn is_available(&self) -> bool {
        self.engine.is_some()
    }

    /// Sender that feeds the update queue, for engines driven from elsewhere
    pub fn update_sender(&self) -> Sender<RawUpdate> {
        self.sender.clone()
    }

    /// Legal destinations for the piece on `from`; empty when unavailable
    pub fn legal_destinations(&self, from: Position) -> Vec<Position> {
        let Some(engine) = &self.engine else {
            return Vec::new();
        };
        let json = engine.legal_destinations(&from.to_algebraic());
        match wire::decode_destinations(&json) {
            Ok(targets) => targets,
            Err(e) => {
                warn!("[ENGINE] Bad destination list for {}: {}", from, e);
                Vec::new()
            }
        }
    }

    pub fn is_legal(&self, from: Position, to: Position) -> bool {
        self.engine
            .as_ref()
            .is_some_and(|engine| engine.is_legal(&from.to_algebraic(), &to.to_algebraic()))
    }

    /// Ask the engine about `from`-`to`, as an error when it is refused
    pub fn check_move(&self, from: Position, to: Position) -> GameResult<()> {
        if !self.is_available() {
            return Err(GameError::EngineUnavailable);
        }
        if !self.is_legal(from, to) {
            return Err(GameError::IllegalMove { from, to });
        }
        Ok(())
    }

    pub fn submit_move(&mut self, mv: &Move) -> GameResult<()> {
        let engine = self.engine.as_mut().ok_or(GameError::EngineUnavailable)?;
        debug!("[ENGINE] Submitting {}", mv);
        engine.submit_move(
            &mv.from.to_algebraic(),
            &mv.to.to_algebraic(),
            &mv.promotion_arg(),
        );
        Ok(())
    }

    pub fn begin_game(
        &mut self,
        human_white: bool,
        human_black: bool,
        difficulty: u8,
    ) -> GameResult<()> {
        let engine = self.engine.as_mut().ok_or(GameError::EngineUnavailable)?;
        info!(
            "[ENGINE] Starting game (white human: {}, black human: {}, difficulty {})",
            human_white, human_black, difficulty
        );
        engine.begin_game(human_white, human_black, difficulty);
        Ok(())
    }

    pub fn resign(&mut self) -> GameResult<()> {
        let engine = self.engine.as_mut().ok_or(GameError::EngineUnavailable)?;
        engine.resign();
        Ok(())
    }

    pub fn reset_game(&mut self) -> GameResult<()> {
        let engine = self.engine.as_mut().ok_or(GameError::EngineUnavailable)?;
        engine.reset_game();
        Ok(())
    }

    /// Number of raw updates waiting to be decoded
    pub fn pending_updates(&self) -> usize {
        self.receiver.len()
    }

    /// Next decodable update, skipping malformed payloads
    pub fn next_update(&self) -> Option<EngineUpdate> {
        while let Ok(raw) = self.receiver.try_recv() {
            match decode(&raw) {
                Ok(update) => return Some(update),
                Err(e) => warn!("[ENGINE] Dropping malformed update {:?}: {}", raw, e),
            }
        }
        None
    }

    /// Every queued update, in arrival order
    pub fn drain_updates(&self) -> Vec<EngineUpdate> {
        std::iter::from_fn(|| self.next_update()).collect()
    }
}

fn decode(raw: &RawUpdate) -> GameResult<EngineUpdate> {
    match raw {
        RawUpdate::Board(json) => Ok(match wire::decode_board(json)? {
            Some(snapshot) => EngineUpdate::Board(snapshot),
            None => EngineUpdate::Cleared,
        }),
        RawUpdate::Status(json) => Ok(EngineUpdate::Status(wire::decode_status(json)?)),
    }
}
