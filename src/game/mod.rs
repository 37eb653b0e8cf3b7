//! Chess game logic - the controller between a board UI and a rule engine
//!
//! # Module Organization
//!
//! - `types` - Positions, pieces, colors and moves
//! - `board_state` - 64-square board contents
//! - `resources` - Per-game state (turn, selection, history, captures, status,
//!   notices, stats) and the rule engine seam
//! - `controller` - [`SelectionController`], the click-driven state machine
//! - `plugin` - Bevy integration (`bevy` feature)
//!
//! # Data Flow
//!
//! ```text
//! click ──► SelectionController ──► EngineBridge ──► RuleEngine
//!                 ▲                                      │
//!                 └──── process_engine_updates ◄── channel ◄── callbacks
//! ```

pub mod board_state;
pub mod controller;
pub mod error;
#[cfg(feature = "bevy")]
pub mod plugin;
pub mod resources;
pub mod types;

pub use controller::{ClickOutcome, SelectionController};
pub use error::{GameError, GameResult};
#[cfg(feature = "bevy")]
pub use plugin::ControllerPlugin;
