//! Error types for game module
//!
//! Covers move validation, engine availability and engine payload decoding.
//! None of these are fatal: the controller recovers from each one locally.

use crate::game::types::Position;

/// Errors that can occur in game logic
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The engine rejected the attempted move
    #[error("Illegal move: {from}-{to}")]
    IllegalMove { from: Position, to: Position },

    /// No engine is attached to the bridge yet
    #[error("Engine unavailable")]
    EngineUnavailable,

    /// Promotion input that is not one of q/r/b/n
    #[error("Invalid promotion choice: {input:?}")]
    InvalidPromotionChoice { input: String },

    /// Text that is not an algebraic square
    #[error("Invalid position: {input:?}")]
    InvalidPosition { input: String },

    /// Engine payload that does not match the wire format
    #[error("Malformed engine payload: {message}")]
    MalformedPayload { message: String },

    /// Engine payload that is not JSON at all
    #[error("Engine payload is not valid JSON: {0}")]
    PayloadJson(#[from] serde_json::Error),
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
