//! Game history tracking
//!
//! Move ledger and captured-piece tally for the current game.

pub mod captured;
pub mod history;

pub use captured::*;
pub use history::*;
