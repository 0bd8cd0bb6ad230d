//! In-process slot shared between clones.

use std::sync::{Arc, Mutex};

use hashbrown::HashMap;

use super::{KeyValueSlot, PersistError, PersistResult};

/// Map-backed [`KeyValueSlot`]; clones see the same entries.
///
/// Lets a second store "reopen" what a first one persisted, which is how the
/// round-trip tests stand in for browser local storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-seeded with `value` under `key`.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let slot = Self::new();
        if let Ok(mut entries) = slot.entries.lock() {
            entries.insert(key.into(), value.into());
        }
        slot
    }

    /// Current raw value under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn poisoned() -> PersistError {
        PersistError::Unavailable("memory slot lock poisoned".to_string())
    }
}

impl KeyValueSlot for MemorySlot {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        let entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PersistResult<()> {
        let mut entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
