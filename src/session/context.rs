//! Session context: lifecycle, actor management, input access

use std::cell::RefCell;
use std::rc::Rc;

use crate::engine::{ActorHandle, ActorKind, RollbackEngine};
use crate::registry::PeerRegistry;
use crate::transport::UdpTransport;

use super::error::SessionError;
use super::hooks::{LoadStateFn, RunFrameFn, SaveStateFn, SessionEventFn};
use super::params::SessionParams;

/// Payload of a one-shot probe datagram. Content is arbitrary: receivers
/// treat any datagram from an unknown sender as a join signal.
const PROBE_PAYLOAD: &[u8] = b"np-probe";

/// A running netplay session.
///
/// Owns the engine value, the UDP transport, the peer registry, the
/// current-input buffer, and the frontend callbacks. All access is
/// single-threaded and poll-driven: the frontend calls
/// [`update`](Self::update) once per frame and everything else happens
/// inside that call.
///
/// [`shutdown`](Self::shutdown) tears the session down and is idempotent;
/// dropping the session does the same.
pub struct NetplaySession<E: RollbackEngine> {
    /// Engine value; `None` once the session is shut down
    pub(super) engine: Option<E>,
    /// Owned transport; dropped (socket closed) on shutdown
    pub(super) transport: Option<UdpTransport>,
    /// Known-peer set, shared with the transport for receive-time dedup
    pub(super) registry: Rc<RefCell<PeerRegistry>>,

    pub(super) save_cb: SaveStateFn,
    pub(super) load_cb: LoadStateFn,
    pub(super) run_frame_cb: Option<RunFrameFn>,
    pub(super) session_event_cb: Option<SessionEventFn>,

    pub(super) num_players: usize,
    pub(super) input_size: usize,
    pub(super) state_size: usize,

    /// Authoritative input for the frame currently being advanced
    pub(super) current_input: Vec<u8>,
    /// Whether `current_input` holds this frame's confirmed blob
    pub(super) input_available: bool,
    /// Set once a save or advance has produced a valid restore point
    pub(super) ready_for_state: bool,

    pub(super) local_actors: usize,
    pub(super) remote_actors: usize,
}

impl<E: RollbackEngine> NetplaySession<E> {
    /// Start a session: bind the transport, configure and start the
    /// engine.
    ///
    /// The engine configuration is built from `params` verbatim. Every
    /// failure path releases whatever was acquired before it; on `Err`
    /// no session value exists.
    pub fn start(
        mut engine: E,
        params: &SessionParams,
        save_state: SaveStateFn,
        load_state: LoadStateFn,
    ) -> Result<Self, SessionError> {
        let registry = Rc::new(RefCell::new(PeerRegistry::new()));
        let transport = UdpTransport::bind(params.port, Rc::clone(&registry))?;

        let config = params.engine_config();
        engine.start(&config)?;

        tracing::info!(
            num_players = config.num_players,
            max_spectators = config.max_spectators,
            port = transport.port(),
            "Netplay session started"
        );

        Ok(Self {
            engine: Some(engine),
            transport: Some(transport),
            registry,
            save_cb: save_state,
            load_cb: load_state,
            run_frame_cb: None,
            session_event_cb: None,
            num_players: params.num_players,
            input_size: params.input_size,
            state_size: params.state_size,
            current_input: vec![0u8; params.input_size],
            input_available: false,
            ready_for_state: false,
            local_actors: 0,
            remote_actors: 0,
        })
    }

    /// Tear the session down: drop the engine, close the socket, forget
    /// all peers, reset all state. No-op on an inactive session.
    pub fn shutdown(&mut self) {
        if self.engine.is_none() {
            return;
        }

        self.engine = None;
        self.transport = None;
        self.registry.borrow_mut().clear();
        self.current_input.fill(0);
        self.input_available = false;
        self.ready_for_state = false;
        self.local_actors = 0;
        self.remote_actors = 0;

        tracing::info!("Netplay session shut down");
    }

    /// Whether the session is active (started and not shut down).
    pub fn is_active(&self) -> bool {
        self.engine.is_some()
    }

    /// Register an actor with the engine.
    ///
    /// Local and remote actors count against the configured player
    /// count; registration beyond it is rejected before the engine is
    /// touched, so no partial registration can occur. A remote actor's
    /// endpoint is recorded in the peer registry on success.
    pub fn add_actor(
        &mut self,
        kind: ActorKind,
        endpoint: Option<&str>,
    ) -> Result<ActorHandle, SessionError> {
        let Some(engine) = self.engine.as_mut() else {
            return Err(SessionError::NotActive);
        };

        let registered = self.local_actors + self.remote_actors;
        if matches!(kind, ActorKind::Local | ActorKind::Remote) && registered >= self.num_players {
            tracing::warn!(
                ?kind,
                registered,
                max = self.num_players,
                "Player slots exhausted; rejecting actor"
            );
            return Err(SessionError::PlayersFull {
                registered,
                max: self.num_players,
            });
        }

        let endpoint = endpoint.filter(|ep| !ep.is_empty());
        if !matches!(kind, ActorKind::Local) && endpoint.is_none() {
            return Err(SessionError::MissingEndpoint(kind));
        }

        let handle = engine.add_actor(kind, endpoint)?;

        match kind {
            ActorKind::Local => self.local_actors += 1,
            ActorKind::Remote => {
                self.remote_actors += 1;
                if let Some(ep) = endpoint {
                    self.registry.borrow_mut().remember(ep);
                }
            }
            ActorKind::Spectator => {}
        }

        tracing::info!(handle, ?kind, "Actor added");
        Ok(handle)
    }

    /// Queue a local input blob for this frame.
    ///
    /// The blob must use the layout and size configured as `input_size`.
    pub fn push_local_input(
        &mut self,
        actor: ActorHandle,
        input: &[u8],
    ) -> Result<(), SessionError> {
        let Some(engine) = self.engine.as_mut() else {
            return Err(SessionError::NotActive);
        };
        engine.add_local_input(actor, input);
        Ok(())
    }

    /// Delay a local actor's input by `delay_frames`. No-op on an
    /// inactive session.
    pub fn set_local_delay(&mut self, actor: ActorHandle, delay_frames: u8) {
        if let Some(engine) = self.engine.as_mut() {
            engine.set_local_delay(actor, delay_frames);
        }
    }

    /// Set the hook invoked for each advance event.
    pub fn set_run_frame_hook(&mut self, hook: RunFrameFn) {
        self.run_frame_cb = Some(hook);
    }

    /// Set the hook receiving forwarded session events.
    pub fn set_session_event_hook(&mut self, hook: SessionEventFn) {
        self.session_event_cb = Some(hook);
    }

    /// The confirmed input blob for the frame being advanced.
    ///
    /// Available from an advance event until the start of the next
    /// [`update`](Self::update); `None` outside that window.
    pub fn current_input(&self) -> Option<&[u8]> {
        if self.input_available {
            Some(&self.current_input)
        } else {
            None
        }
    }

    /// Whether a valid restore point exists (a save or advance has
    /// completed). Load events are skipped until this is true.
    pub fn is_ready_for_state(&self) -> bool {
        self.ready_for_state
    }

    /// Number of registered local actors.
    pub fn local_actor_count(&self) -> usize {
        self.local_actors
    }

    /// Number of registered remote actors.
    pub fn remote_actor_count(&self) -> usize {
        self.remote_actors
    }

    /// The local UDP port the transport is bound to, while active.
    pub fn local_port(&self) -> Option<u16> {
        self.transport.as_ref().map(UdpTransport::port)
    }

    /// Snapshot of the known remote endpoints, in registration order.
    pub fn known_peers(&self) -> Vec<String> {
        self.registry
            .borrow()
            .iter()
            .map(str::to_string)
            .collect()
    }

    /// Fire a one-shot datagram at an `"ip:port"` endpoint through the
    /// session's adapter.
    ///
    /// Useful before the engine exchanges traffic: the receiving side's
    /// auto-discovery registers the prober as a remote actor. Best
    /// effort, like every send at this layer.
    pub fn send_probe(&mut self, endpoint: &str) {
        if let Some(transport) = self.transport.as_mut() {
            transport.send(endpoint, PROBE_PAYLOAD);
        }
    }
}

impl<E: RollbackEngine> Drop for NetplaySession<E> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
