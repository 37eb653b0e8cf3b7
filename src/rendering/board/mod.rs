//! Board view module

pub mod board;

// Re-export all public items
pub use board::*;
