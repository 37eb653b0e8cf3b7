//! Chess board controller
//!
//! A click-driven selection and move state machine that keeps a board view
//! in sync with an external rule engine. The engine decides legality; the
//! controller tracks selection, turn, move ledger, captures, game status
//! and persisted statistics.
//!
//! ```rust,no_run
//! use chess_controller::core::{ControllerConfig, MemoryStore};
//! use chess_controller::game::resources::engine::{EngineBridge, LocalEngine};
//! use chess_controller::game::types::Position;
//! use chess_controller::game::SelectionController;
//!
//! let bridge = EngineBridge::new(Box::new(LocalEngine::new()));
//! let mut controller =
//!     SelectionController::new(ControllerConfig::default(), bridge, Box::new(MemoryStore::new()));
//! controller.start_new_game(None);
//! controller.process_engine_updates();
//!
//! if let (Some(e2), Some(e4)) = (Position::from_algebraic("e2"), Position::from_algebraic("e4")) {
//!     controller.click(e2);
//!     controller.click(e4);
//! }
//! controller.process_engine_updates();
//! print!("{}", controller.view().render_text());
//! ```

pub mod core;
pub mod game;
pub mod rendering;
