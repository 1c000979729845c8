//! Per-frame event pump

use crate::engine::{ActorKind, Frame, GameEvent, RollbackEngine, StateCell};

use super::context::NetplaySession;

impl<E: RollbackEngine> NetplaySession<E> {
    /// Drive one engine update.
    ///
    /// Clears the published-input marker, lets the engine poll the
    /// network, registers any newly discovered senders, then drains the
    /// session-event and game-event queues in order. No-op on an
    /// inactive session.
    ///
    /// Malformed or unexpected events are logged and skipped; nothing in
    /// this path returns an error or panics.
    pub fn update(&mut self) {
        if self.engine.is_none() {
            return;
        }

        self.input_available = false;

        if let (Some(engine), Some(transport)) = (self.engine.as_mut(), self.transport.as_mut()) {
            engine.poll_network(transport);
        }

        self.register_discovered_peers();
        self.forward_session_events();
        self.process_game_events();
    }

    /// Register senders the transport discovered during the poll as
    /// remote actors, while player capacity remains.
    fn register_discovered_peers(&mut self) {
        let Some(transport) = self.transport.as_mut() else {
            return;
        };

        for addr in transport.take_discovered() {
            if self.local_actors + self.remote_actors >= self.num_players {
                tracing::debug!(peer = %addr, "Ignoring unknown sender, player slots full");
                continue;
            }
            match self.add_actor(ActorKind::Remote, Some(&addr)) {
                Ok(handle) => {
                    tracing::info!(peer = %addr, handle, "Auto-registered remote actor");
                }
                Err(e) => {
                    tracing::warn!(peer = %addr, error = %e, "Failed to auto-register remote actor");
                }
            }
        }
    }

    /// Forward session-level events to the frontend hook, verbatim and
    /// in order.
    fn forward_session_events(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        for event in engine.drain_session_events() {
            tracing::debug!(?event, "Session event");
            if let Some(hook) = self.session_event_cb.as_mut() {
                hook(&event);
            }
        }
    }

    /// Dispatch game events in order.
    fn process_game_events(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        for event in engine.drain_game_events() {
            match event {
                GameEvent::Save {
                    frame,
                    capacity,
                    cell,
                } => self.handle_save(frame, capacity, cell),
                GameEvent::Load { frame, state } => self.handle_load(frame, &state),
                GameEvent::Advance {
                    frame,
                    inputs,
                    rolling_back,
                } => self.handle_advance(frame, &inputs, rolling_back),
                GameEvent::Empty => {}
            }
        }
    }

    fn handle_save(&mut self, frame: Frame, capacity: usize, cell: StateCell) {
        // Clamp the engine-requested capacity to the configured bound so
        // the frontend can never write past the buffer it was promised.
        let capacity = capacity.min(self.state_size);
        let mut buf = vec![0u8; capacity];

        let Some(output) = (self.save_cb)(&mut buf) else {
            tracing::warn!(frame, "save_state callback failed");
            return;
        };

        let len = output.len.min(capacity);
        buf.truncate(len);

        tracing::trace!(frame, len, checksum = ?output.checksum, "State saved");
        cell.save(frame, buf, output.checksum);
        self.ready_for_state = true;
    }

    fn handle_load(&mut self, frame: Frame, state: &[u8]) {
        // Never restore into a session that has not produced a valid
        // save point.
        if !self.ready_for_state {
            tracing::warn!(frame, "Load skipped, no valid save exists yet");
            return;
        }
        if state.is_empty() {
            tracing::warn!(frame, "Load skipped, empty state blob");
            return;
        }

        if !(self.load_cb)(state) {
            tracing::warn!(frame, len = state.len(), "load_state callback failed");
            return;
        }

        tracing::trace!(frame, len = state.len(), "State restored");
    }

    fn handle_advance(&mut self, frame: Frame, inputs: &[u8], rolling_back: bool) {
        if inputs.len() < self.input_size {
            tracing::warn!(
                got = inputs.len(),
                expected = self.input_size,
                "Input blob shorter than expected"
            );
            self.current_input.fill(0);
            self.current_input[..inputs.len()].copy_from_slice(inputs);
        } else {
            self.current_input
                .copy_from_slice(&inputs[..self.input_size]);
        }
        self.input_available = true;

        tracing::trace!(frame, rolling_back, "Advancing frame");
        if let Some(hook) = self.run_frame_cb.as_mut() {
            hook();
        }

        // A completed advance is a valid point to serialize from.
        self.ready_for_state = true;
    }
}
