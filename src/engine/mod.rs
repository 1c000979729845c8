//! Opaque rollback-engine boundary
//!
//! The engine that owns prediction, confirmation, and state rewind is an
//! external collaborator. This module defines the capability surface the
//! rest of the crate programs against:
//!
//! - [`RollbackEngine`]: the session capability set (start, actors, input,
//!   network poll, event drains)
//! - [`NetworkAdapter`]: the datagram send/receive surface the engine
//!   drives during a network poll
//! - [`GameEvent`] / [`SessionEvent`]: the two ordered event streams an
//!   engine emits per update
//! - [`EngineConfig`]: the configuration handed to the engine verbatim
//!
//! Engine bindings live outside this crate; tests use a scripted engine
//! behind the same trait.

mod adapter;
mod backend;
mod config;
mod events;

pub use adapter::{InboundPacket, NetworkAdapter};
pub use backend::{ActorHandle, ActorKind, EngineError, RollbackEngine};
pub use config::{DEFAULT_PREDICTION_WINDOW, EngineConfig};
pub use events::{Frame, GameEvent, SavedFrame, SessionEvent, StateCell};
