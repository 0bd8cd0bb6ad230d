//! Slot persistence for the trip collection.

pub mod memory;
pub mod snapshot;
pub mod sqlite;

use thiserror::Error;

/// Slot key used when none is configured.
pub const DEFAULT_SLOT_KEY: &str = "trips";

/// Failure reading, writing, or decoding the key-value slot.
#[derive(Debug, Error)]
pub enum PersistError {
    /// SQLite backend error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Snapshot could not be encoded or decoded.
    #[error("snapshot serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Slot rejected the operation (closed, quota exceeded, ...).
    #[error("slot unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for slot operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Opaque string key-value storage, the durable mirror of the trip collection.
pub trait KeyValueSlot: Send {
    /// Reads the value stored under `key`, `None` when absent.
    fn get(&self, key: &str) -> PersistResult<Option<String>>;
    /// Overwrites the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> PersistResult<()>;
}
