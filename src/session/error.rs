//! Session error types

use thiserror::Error;

use crate::engine::{ActorKind, EngineError};
use crate::transport::TransportError;

/// Errors from session lifecycle and actor management.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Operation attempted on a session that has been shut down
    #[error("session is not active")]
    NotActive,
    /// Remote+local registrations reached the configured player count
    #[error("player slots exhausted ({registered}/{max})")]
    PlayersFull {
        /// Actors already registered (local + remote)
        registered: usize,
        /// Configured player count
        max: usize,
    },
    /// Remote or spectator actor registered without an endpoint
    #[error("{0:?} actor requires an endpoint")]
    MissingEndpoint(ActorKind),
    /// Transport creation failed during start
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The engine reported a failure
    #[error(transparent)]
    Engine(#[from] EngineError),
}
