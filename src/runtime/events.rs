//! Runtime event stream payloads.

use crate::types::TripId;

/// Events emitted from the single-writer runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripEvent {
    /// A new trip was created.
    Added {
        /// Created trip id.
        id: TripId,
    },
    /// An existing trip was changed.
    Edited {
        /// Edited trip id.
        id: TripId,
    },
    /// A trip was removed.
    Deleted {
        /// Removed trip id.
        id: TripId,
    },
    /// A mutation was applied in memory but the slot write failed.
    PersistFailed {
        /// Rendered slot error.
        message: String,
    },
}
