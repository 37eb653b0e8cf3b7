//! Controller state
//!
//! Each piece of state the controller owns lives in its own module:
//!
//! ## Turn and selection
//! - [`CurrentTurn`] - Side to move and full-move number
//! - [`SelectionState`] - Idle, piece selected, or waiting on a promotion choice
//!
//! ## Game record
//! - [`MoveHistory`] - Move ledger in submission order
//! - [`CapturedPieces`] - Captured pieces and material balance
//! - [`StatusReport`] - Last reported game status
//!
//! ## Presentation
//! - [`NoticeBoard`] - Transient messages for the user
//!
//! ## Persistence
//! - [`StatsStore`] - Games played, wins and draws across sessions
//!
//! ## Engine
//! - [`engine`] - Rule engine seam, wire format and update queue

pub mod engine;
pub mod game_over;
pub mod history;
pub mod notice;
pub mod promotion;
pub mod selection;
pub mod stats;
pub mod turn;

pub use engine::{EngineBridge, EngineUpdate, LocalEngine, RuleEngine};
pub use game_over::*;
pub use history::*;
pub use notice::*;
pub use promotion::*;
pub use selection::*;
pub use stats::*;
pub use turn::*;
