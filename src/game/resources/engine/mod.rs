//! Rule engine integration
//!
//! The [`RuleEngine`] trait is the seam to whatever owns move legality.
//! [`EngineBridge`] queues its callbacks, [`wire`] decodes its payloads and
//! [`LocalEngine`] is an in-process implementation for the terminal host.

pub mod bridge;
pub mod local;
pub mod wire;

pub use bridge::{EngineBridge, EngineCallback, EngineUpdate, RawUpdate, RuleEngine};
pub use local::LocalEngine;
pub use wire::BoardSnapshot;
