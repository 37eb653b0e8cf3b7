//! Rendering module - the board view model the host draws from
//!
//! No drawing happens here. [`BoardView`] exposes 64 cells with occupants
//! and decorations; a terminal host prints [`BoardView::render_text`], a
//! graphical host maps cells to its own widgets.

pub mod board;

pub use board::*;
