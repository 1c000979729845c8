//! Session parameters

use crate::engine::{DEFAULT_PREDICTION_WINDOW, EngineConfig};

/// Parameters for starting a netplay session.
///
/// The engine-facing fields are passed through to [`EngineConfig`]
/// verbatim; `port` stays on this side and selects the local UDP port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionParams {
    /// Number of players in the session (local + remote)
    pub num_players: usize,
    /// Maximum number of spectators
    pub max_spectators: usize,
    /// Input prediction window in frames
    pub input_prediction_window: usize,
    /// Frames a spectator's view runs behind the players
    pub spectator_delay: usize,
    /// Size in bytes of one frame's input blob
    pub input_size: usize,
    /// Upper bound in bytes of a serialized state snapshot
    pub state_size: usize,
    /// Local UDP port to bind (0 = OS-assigned)
    pub port: u16,
    /// Ask the engine to save state only when strictly required
    pub limited_saving: bool,
    /// Allow spectators to join after the session has synchronized
    pub post_sync_joining: bool,
    /// Exchange state checksums between peers to detect divergence
    pub desync_detection: bool,
}

impl SessionParams {
    /// Parameters with the common knobs set and the rest defaulted.
    pub fn new(num_players: usize, input_size: usize, state_size: usize, port: u16) -> Self {
        Self {
            num_players,
            max_spectators: 0,
            input_prediction_window: DEFAULT_PREDICTION_WINDOW,
            spectator_delay: 0,
            input_size,
            state_size,
            port,
            limited_saving: false,
            post_sync_joining: false,
            desync_detection: false,
        }
    }

    /// The engine configuration derived from these parameters.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            num_players: self.num_players,
            max_spectators: self.max_spectators,
            input_prediction_window: self.input_prediction_window,
            spectator_delay: self.spectator_delay,
            input_size: self.input_size,
            state_size: self.state_size,
            limited_saving: self.limited_saving,
            post_sync_joining: self.post_sync_joining,
            desync_detection: self.desync_detection,
        }
    }
}
