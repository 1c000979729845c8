//! Non-blocking UDP datagram transport

use std::cell::RefCell;
use std::fmt;
use std::io;
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use std::rc::Rc;

use crate::engine::InboundPacket;
use crate::registry::PeerRegistry;

use super::endpoint::Endpoint;
use super::error::TransportError;

/// Buffer size for one incoming datagram (engine packets are small)
const RECV_BUFFER_SIZE: usize = 2048;

/// Initial capacity of the inbound batch
const INITIAL_BATCH_CAPACITY: usize = 8;

/// One non-blocking UDP socket plus the inbound batch storage.
///
/// The transport is owned exclusively by its session and handed to the
/// engine as a `&mut dyn NetworkAdapter` during each network poll. Sends
/// are fire-and-forget; receives drain the kernel queue into a batch
/// that is reused across polls.
///
/// Senders that are not yet in the peer registry are recorded during a
/// receive and can be drained with [`take_discovered`](Self::take_discovered);
/// the session registers them as remote actors while player capacity
/// remains.
pub struct UdpTransport {
    socket: UdpSocket,
    local_addr: SocketAddr,
    /// Receive buffer for one datagram, reused
    recv_buf: Vec<u8>,
    /// Inbound batch storage, cleared and refilled on every poll
    batch: Vec<InboundPacket>,
    /// Known-peer set shared with the owning session
    registry: Rc<RefCell<PeerRegistry>>,
    /// Unknown senders seen since the last drain, deduplicated
    discovered: Vec<String>,
}

impl UdpTransport {
    /// Bind a non-blocking socket to the wildcard address on `port`.
    ///
    /// Port 0 asks the OS for a free port; the bound port is available
    /// via [`port`](Self::port). Partially acquired resources are
    /// released on every failure path.
    pub fn bind(
        port: u16,
        registry: Rc<RefCell<PeerRegistry>>,
    ) -> Result<Self, TransportError> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, port)).map_err(TransportError::Bind)?;

        socket
            .set_nonblocking(true)
            .map_err(TransportError::NonBlocking)?;

        let local_addr = socket.local_addr().map_err(TransportError::Bind)?;

        tracing::debug!(port = local_addr.port(), "UdpTransport bound");

        Ok(Self {
            socket,
            local_addr,
            recv_buf: vec![0u8; RECV_BUFFER_SIZE],
            batch: Vec::with_capacity(INITIAL_BATCH_CAPACITY),
            registry,
            discovered: Vec::new(),
        })
    }

    /// The local address the socket is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// The local port the socket is bound to.
    pub fn port(&self) -> u16 {
        self.local_addr.port()
    }

    /// Fire-and-forget datagram send to an `"ip:port"` endpoint.
    ///
    /// Parse failures, non-IPv4 hosts, and send errors are logged and
    /// dropped; retransmission is the engine's job.
    pub fn send(&mut self, endpoint: &str, payload: &[u8]) {
        if payload.is_empty() {
            return;
        }

        let parsed: Endpoint = match endpoint.parse() {
            Ok(ep) => ep,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid send endpoint");
                return;
            }
        };

        let target = match parsed.socket_addr() {
            Ok(addr) => addr,
            Err(e) => {
                tracing::warn!(error = %e, "Unresolvable send endpoint");
                return;
            }
        };

        if let Err(e) = self.socket.send_to(payload, SocketAddr::V4(target)) {
            // WouldBlock is expected when the send buffer is full
            if e.kind() != io::ErrorKind::WouldBlock {
                tracing::warn!(error = %e, "Failed to send datagram");
            }
        }
    }

    /// Drain every queued datagram into the inbound batch.
    ///
    /// Stops without error once the socket reports `WouldBlock` (or an
    /// interrupted call). The returned slice borrows batch storage that
    /// is overwritten by the next poll.
    pub fn receive_batch(&mut self) -> &[InboundPacket] {
        self.batch.clear();

        loop {
            match self.socket.recv_from(&mut self.recv_buf) {
                Ok((len, from)) => {
                    let from = from.to_string();
                    self.note_sender(&from);
                    self.batch.push(InboundPacket {
                        from,
                        payload: self.recv_buf[..len].to_vec(),
                    });
                }
                Err(e)
                    if e.kind() == io::ErrorKind::WouldBlock
                        || e.kind() == io::ErrorKind::Interrupted =>
                {
                    break;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Receive error");
                    break;
                }
            }
        }

        &self.batch
    }

    /// Record a sender for auto-registration if the registry does not
    /// know it yet.
    fn note_sender(&mut self, from: &str) {
        if self.registry.borrow().known(from) {
            return;
        }
        if self.discovered.iter().any(|addr| addr == from) {
            return;
        }
        self.discovered.push(from.to_string());
    }

    /// Drain the unknown senders recorded since the last call.
    pub fn take_discovered(&mut self) -> Vec<String> {
        std::mem::take(&mut self.discovered)
    }
}

impl fmt::Debug for UdpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UdpTransport")
            .field("local_addr", &self.local_addr)
            .field("batched_packets", &self.batch.len())
            .field("discovered", &self.discovered.len())
            .finish()
    }
}
