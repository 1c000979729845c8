//! Rollback engine capability trait

use thiserror::Error;

use super::adapter::NetworkAdapter;
use super::config::EngineConfig;
use super::events::{GameEvent, SessionEvent};

/// Engine-assigned identifier for a registered actor.
pub type ActorHandle = usize;

/// Kinds of session participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    /// Controlled by an input device on this machine
    Local,
    /// A networked peer contributing input
    Remote,
    /// Receives state but contributes no input
    Spectator,
}

/// Errors reported by an engine binding.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// The engine rejected the session configuration
    #[error("failed to start engine session: {0}")]
    Start(String),
    /// The engine rejected an actor registration
    #[error("engine rejected {kind:?} actor: {reason}")]
    ActorRejected {
        /// Kind of the rejected actor
        kind: ActorKind,
        /// Engine-provided reason
        reason: String,
    },
}

/// Capability set of the external rollback engine.
///
/// Prediction, rollback, retransmission, and packet ordering all live
/// behind this trait; this crate never looks inside. Creating a session
/// is constructing the implementing value, tearing it down is dropping
/// it. Bindings clone whatever address data they retain past a call.
///
/// Methods must not block: the whole stack is poll-driven from the
/// frontend's frame loop.
pub trait RollbackEngine {
    /// Start the session with the given configuration.
    fn start(&mut self, config: &EngineConfig) -> Result<(), EngineError>;

    /// Register an actor, returning its engine-assigned handle.
    ///
    /// Remote and spectator actors carry an `"ip:port"` endpoint; local
    /// actors do not need one.
    fn add_actor(
        &mut self,
        kind: ActorKind,
        endpoint: Option<&str>,
    ) -> Result<ActorHandle, EngineError>;

    /// Queue a local input blob for the current frame.
    fn add_local_input(&mut self, actor: ActorHandle, input: &[u8]);

    /// Delay a local actor's input by the given number of frames,
    /// trading latency for fewer rollbacks.
    fn set_local_delay(&mut self, actor: ActorHandle, delay_frames: u8);

    /// Drive the engine's internal send/receive over the given adapter.
    ///
    /// The engine owns retransmission timers and message framing; the
    /// adapter only moves opaque datagrams.
    fn poll_network(&mut self, adapter: &mut dyn NetworkAdapter);

    /// Drain pending session-level notifications, in emission order.
    fn drain_session_events(&mut self) -> Vec<SessionEvent>;

    /// Drain pending game events (save/load/advance), in emission order.
    fn drain_game_events(&mut self) -> Vec<GameEvent>;
}
