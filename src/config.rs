//! Store configuration.

use crate::persist::DEFAULT_SLOT_KEY;

/// Options fixed when a [`crate::core::store::TripStore`] is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Slot key holding the serialized collection.
    pub slot_key: String,
    /// Memoize filtered/sorted views until the next mutation.
    pub cache_views: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            cache_views: false,
        }
    }
}
