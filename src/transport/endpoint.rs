//! Endpoint codec
//!
//! Converts between the textual `"host:port"` form used as the addressing
//! and deduplication unit and a structured endpoint. Pure and stateless.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::str::FromStr;

use thiserror::Error;

/// Maximum accepted length of an endpoint string, in bytes.
pub const MAX_ENDPOINT_LEN: usize = 127;

/// Errors from parsing or resolving an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    /// The string exceeds [`MAX_ENDPOINT_LEN`] bytes
    #[error("endpoint exceeds {MAX_ENDPOINT_LEN} bytes")]
    TooLong,
    /// No `:` separator was found
    #[error("endpoint has no port separator")]
    MissingPort,
    /// The `:` separator sits at position zero
    #[error("endpoint has an empty host")]
    EmptyHost,
    /// The port part is not a decimal u16
    #[error("invalid port number '{0}'")]
    InvalidPort(String),
    /// The host part is not a numeric IPv4 address
    #[error("host is not an IPv4 address: '{0}'")]
    InvalidHost(String),
}

/// A parsed `"host:port"` endpoint.
///
/// The split is at the *last* colon. The host is kept as text; it is only
/// required to be a numeric IPv4 address when the endpoint is resolved
/// for the wire via [`socket_addr`](Self::socket_addr).
///
/// Canonical inputs round-trip: `format(parse(s)) == s`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Build an endpoint from parts.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// The host part, as text.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The port part.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Resolve to a socket address, requiring a numeric IPv4 host.
    pub fn socket_addr(&self) -> Result<SocketAddrV4, EndpointError> {
        let ip: Ipv4Addr = self
            .host
            .parse()
            .map_err(|_| EndpointError::InvalidHost(self.host.clone()))?;
        Ok(SocketAddrV4::new(ip, self.port))
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > MAX_ENDPOINT_LEN {
            return Err(EndpointError::TooLong);
        }
        let colon = s.rfind(':').ok_or(EndpointError::MissingPort)?;
        if colon == 0 {
            return Err(EndpointError::EmptyHost);
        }
        let (host, port_text) = (&s[..colon], &s[colon + 1..]);
        let port: u16 = port_text
            .parse()
            .map_err(|_| EndpointError::InvalidPort(port_text.to_string()))?;
        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
