//! Game status tracking
//!
//! The engine reports the game status through its status callback; this
//! module holds the decoded value and the display text for it.
//!
//! # State Transitions
//!
//! ```text
//! Ready → Playing ⇄ Check → Checkmate / Stalemate / Resigned
//! ```
//!
//! `Checkmate`, `Stalemate` and `Resigned` are terminal: no further moves
//! are accepted until a new game starts.

use crate::game::types::Color;
use serde::{Deserialize, Serialize};

/// Status of the current game as last reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// No game running (also what the engine calls `no_game`)
    #[default]
    #[serde(alias = "no_game")]
    Ready,
    Playing,
    Check,
    Checkmate,
    Stalemate,
    Resigned,
}

impl GameStatus {
    /// Whether the game has ended
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::Resigned
        )
    }

    /// Text for the game status display region
    pub fn text(self) -> &'static str {
        match self {
            GameStatus::Ready => "Ready to play",
            GameStatus::Playing => "Game in progress",
            GameStatus::Check => "Check!",
            GameStatus::Checkmate => "Checkmate!",
            GameStatus::Stalemate => "Stalemate!",
            GameStatus::Resigned => "Resigned",
        }
    }
}

/// A status update as delivered by the engine's status callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusReport {
    pub status: GameStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Color>,
}

impl StatusReport {
    pub fn new(status: GameStatus, winner: Option<Color>) -> Self {
        Self { status, winner }
    }

    /// Result line for a finished game, `None` while play continues
    pub fn result_message(&self) -> Option<String> {
        if !self.status.is_terminal() {
            return None;
        }
        Some(match (self.status, self.winner) {
            (GameStatus::Stalemate, _) => "Draw by stalemate".to_string(),
            (GameStatus::Checkmate, Some(winner)) => format!("{winner} wins by checkmate"),
            (GameStatus::Resigned, Some(winner)) => format!("{winner} wins by resignation"),
            (GameStatus::Checkmate, None) => "Checkmate".to_string(),
            _ => "Game resigned".to_string(),
        })
    }
}
