//! Network adapter capability
//!
//! The engine moves opaque datagrams through this trait during a network
//! poll. Addressing uses literal `"ip:port"` text on both sides of the
//! boundary.

/// One datagram captured by a transport poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundPacket {
    /// Sender endpoint as `"ip:port"` text
    pub from: String,
    /// Private copy of the payload bytes
    pub payload: Vec<u8>,
}

/// Datagram surface the engine drives during a network poll.
///
/// Delivery is unreliable and unordered; retransmission and ordering are
/// the engine's job. The slice returned by
/// [`receive_all`](Self::receive_all) borrows the adapter's internal
/// batch storage and is invalidated by the next call on the adapter;
/// the `&mut self` receiver turns retaining it into a borrow error.
pub trait NetworkAdapter {
    /// Fire-and-forget send to an `"ip:port"` endpoint.
    ///
    /// Unparsable endpoints and send failures are dropped without
    /// reporting; there is no delivery confirmation at this layer.
    fn send_to(&mut self, endpoint: &str, payload: &[u8]);

    /// Drain every queued datagram without blocking.
    fn receive_all(&mut self) -> &[InboundPacket];
}
