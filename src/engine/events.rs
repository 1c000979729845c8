//! Engine event streams
//!
//! An engine update produces two ordered event streams: session-level
//! notifications (connections, desync) that are forwarded to the frontend
//! unmodified, and game events (save/load/advance) that drive the
//! emulation loop.

use std::cell::RefCell;
use std::rc::Rc;

use super::backend::ActorHandle;

/// Frame number as reported by the engine.
pub type Frame = i32;

/// Session-level notifications emitted by the engine.
///
/// The event pump forwards these to the frontend callback verbatim; no
/// transformation or filtering happens at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// All peers finished synchronizing and gameplay may begin
    SessionStarted,
    /// A remote actor completed its handshake
    PlayerConnected {
        /// Handle of the actor that connected
        handle: ActorHandle,
    },
    /// A remote actor stopped responding and was dropped
    PlayerDisconnected {
        /// Handle of the actor that disconnected
        handle: ActorHandle,
    },
    /// A spectator fell too far behind and its playback was paused
    SpectatorPaused {
        /// Handle of the paused spectator
        handle: ActorHandle,
    },
    /// A paused spectator caught back up
    SpectatorUnpaused {
        /// Handle of the resumed spectator
        handle: ActorHandle,
    },
    /// State checksums diverged between peers
    ///
    /// The simulation can no longer be reconciled; ending the session is
    /// the frontend's call.
    DesyncDetected {
        /// Frame at which the divergence was detected
        frame: Frame,
        /// Checksum computed locally
        local_checksum: u32,
        /// Checksum reported by the remote peer
        remote_checksum: u32,
    },
}

/// One game event drained from the engine during an update.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// Serialize application state for later rollback
    Save {
        /// Frame the snapshot belongs to
        frame: Frame,
        /// Capacity the engine requests for the snapshot, in bytes
        capacity: usize,
        /// Slot the serialized state is published into
        cell: StateCell,
    },
    /// Restore application state from a previously saved snapshot
    Load {
        /// Frame being rewound to
        frame: Frame,
        /// The snapshot bytes to restore
        state: Vec<u8>,
    },
    /// Run one frame with the confirmed input blob
    Advance {
        /// Frame to simulate
        frame: Frame,
        /// Input blob for the frame (all players, packed)
        inputs: Vec<u8>,
        /// Whether this frame is re-simulated during a rollback
        rolling_back: bool,
    },
    /// Padding event with no payload, ignored
    Empty,
}

/// A serialized state snapshot published back to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFrame {
    /// Frame the snapshot belongs to
    pub frame: Frame,
    /// Snapshot bytes, truncated to the written length
    pub data: Vec<u8>,
    /// Optional checksum over `data`, used for desync detection
    pub checksum: Option<u32>,
}

/// Shared slot the engine attaches to a [`GameEvent::Save`].
///
/// The engine keeps a clone of the cell and reads the snapshot back when
/// it needs to rewind. The whole crate is single-threaded by design (see
/// the crate docs), so the slot is reference-counted without locking.
#[derive(Debug, Clone, Default)]
pub struct StateCell {
    inner: Rc<RefCell<Option<SavedFrame>>>,
}

impl StateCell {
    /// Create an empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a snapshot into the cell, replacing any previous one.
    pub fn save(&self, frame: Frame, data: Vec<u8>, checksum: Option<u32>) {
        *self.inner.borrow_mut() = Some(SavedFrame {
            frame,
            data,
            checksum,
        });
    }

    /// Clone out the stored snapshot, if one has been published.
    pub fn load(&self) -> Option<SavedFrame> {
        self.inner.borrow().clone()
    }

    /// Whether a snapshot has been published.
    pub fn is_filled(&self) -> bool {
        self.inner.borrow().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_cell_starts_empty() {
        let cell = StateCell::new();
        assert!(!cell.is_filled());
        assert!(cell.load().is_none());
    }

    #[test]
    fn test_state_cell_save_load() {
        let cell = StateCell::new();
        cell.save(12, vec![1, 2, 3], Some(0xDEAD));

        let saved = cell.load().unwrap();
        assert_eq!(saved.frame, 12);
        assert_eq!(saved.data, vec![1, 2, 3]);
        assert_eq!(saved.checksum, Some(0xDEAD));
    }

    #[test]
    fn test_state_cell_save_replaces_previous() {
        let cell = StateCell::new();
        cell.save(1, vec![1], None);
        cell.save(2, vec![2], None);

        let saved = cell.load().unwrap();
        assert_eq!(saved.frame, 2);
        assert_eq!(saved.data, vec![2]);
    }

    #[test]
    fn test_state_cell_clones_share_storage() {
        let cell = StateCell::new();
        let engine_side = cell.clone();

        cell.save(3, vec![9], None);
        assert!(engine_side.is_filled());
        assert_eq!(engine_side.load().unwrap().frame, 3);
    }
}
