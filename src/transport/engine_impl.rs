//! Engine NetworkAdapter trait implementation

use crate::engine::{InboundPacket, NetworkAdapter};

use super::udp::UdpTransport;

impl NetworkAdapter for UdpTransport {
    fn send_to(&mut self, endpoint: &str, payload: &[u8]) {
        self.send(endpoint, payload);
    }

    fn receive_all(&mut self) -> &[InboundPacket] {
        self.receive_batch()
    }
}
