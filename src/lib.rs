//! Netherplay - session plumbing for rollback netplay
//!
//! The rollback engine itself (prediction, confirmation, state rewind)
//! is an external collaborator behind the [`RollbackEngine`] trait. This
//! crate provides everything around it:
//!
//! - [`UdpTransport`] - one non-blocking UDP socket per session, driven
//!   by the engine as its [`NetworkAdapter`]
//! - [`PeerRegistry`] - deduplicated bookkeeping of known remote
//!   endpoints, fed by transport-level auto-discovery
//! - [`NetplaySession`] - session lifecycle, actor management, and the
//!   per-frame event pump turning engine save/load/advance events into
//!   frontend callbacks
//!
//! # Frame loop
//!
//! 1. Pack local input into a blob of `input_size` bytes.
//! 2. [`NetplaySession::push_local_input`].
//! 3. [`NetplaySession::update`] - polls the network, forwards session
//!    events, dispatches game events.
//! 4. Read the confirmed input via [`NetplaySession::current_input`]
//!    from inside the run-frame hook.
//!
//! # Concurrency
//!
//! Everything is single-threaded and poll-driven: no call blocks, no
//! callback runs concurrently with another, and the caller serializes
//! all access from its frame-update thread. There are no timers at this
//! layer; retransmission and prediction windows belong to the engine.

pub mod engine;
pub mod registry;
pub mod session;
pub mod transport;

// Re-export the engine boundary
pub use engine::{
    ActorHandle, ActorKind, DEFAULT_PREDICTION_WINDOW, EngineConfig, EngineError, Frame,
    GameEvent, InboundPacket, NetworkAdapter, RollbackEngine, SavedFrame, SessionEvent, StateCell,
};

// Re-export the peer registry
pub use registry::PeerRegistry;

// Re-export session types
pub use session::{
    LoadStateFn, NetplaySession, RunFrameFn, SaveOutput, SaveStateFn, SessionError,
    SessionEventFn, SessionParams,
};

// Re-export transport types
pub use transport::{Endpoint, EndpointError, MAX_ENDPOINT_LEN, TransportError, UdpTransport};
