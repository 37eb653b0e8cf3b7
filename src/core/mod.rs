//! Core module - configuration, persistence and their error types
//!
//! Nothing in here knows about chess. The game module reads its settings
//! from [`ControllerConfig`] and persists stats through a [`KeyValueStore`].
//!
//! # Storage Backends
//!
//! - [`MemoryStore`] - In-process map, shared between clones
//! - [`FileStore`] - One JSON file per key in the user's data directory

pub mod config;
pub mod error;
pub mod storage;

pub use config::{CaptureSource, ControllerConfig};
pub use error::{CoreError, CoreResult};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
