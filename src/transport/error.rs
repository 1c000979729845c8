//! Transport error types

use std::io;

use thiserror::Error;

/// Errors from creating the UDP transport.
///
/// Send and receive failures are never surfaced as errors: consistent
/// with UDP's delivery contract they are logged and dropped.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to create or bind the UDP socket
    #[error("failed to bind UDP socket: {0}")]
    Bind(#[source] io::Error),
    /// Failed to switch the socket to non-blocking mode
    #[error("failed to set non-blocking mode: {0}")]
    NonBlocking(#[source] io::Error),
}
