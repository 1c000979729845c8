//! UDP transport layer
//!
//! One non-blocking datagram socket per session, wrapped as
//! [`UdpTransport`], plus the [`Endpoint`] codec for the `"ip:port"` text
//! addressing used across the engine boundary.
//!
//! The transport is best-effort on purpose: sends are fire-and-forget and
//! receive drains whatever the kernel has queued, then returns. Anything
//! resembling reliability lives in the engine.
//!
//! # Limitations
//!
//! - IPv4 only (endpoint hosts must be numeric IPv4 addresses)
//! - No NAT traversal, no encryption

mod endpoint;
mod engine_impl;
mod error;
mod udp;


pub use endpoint::{Endpoint, EndpointError, MAX_ENDPOINT_LEN};
pub use error::TransportError;
pub use udp::UdpTransport;
