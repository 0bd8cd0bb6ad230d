use hashbrown::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    config::StoreConfig,
    core::clock::{Clock, SystemClock, display_date},
    persist::{KeyValueSlot, PersistError, PersistResult, snapshot},
    query::{cache::ViewCache, view},
    trip::{Countdown, Trip, TripDraft, TripPatch, ValidationErrors},
    types::{CategoryFilter, SortKey, TripId},
};

/// Rejections raised before any state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Draft or patch broke a field rule.
    #[error("invalid trip: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Outcome of a mutation that was applied in memory.
///
/// `warning` is set when the slot write failed; the in-memory collection is
/// still authoritative and the next successful write will carry the change.
#[derive(Debug)]
#[must_use]
pub struct Saved<T> {
    /// Operation result.
    pub value: T,
    /// Slot write failure, if any.
    pub warning: Option<PersistError>,
}

impl<T> Saved<T> {
    /// True when the slot reflects this mutation.
    pub fn is_durable(&self) -> bool {
        self.warning.is_none()
    }
}

/// Authoritative trip collection, newest first, mirrored to a key-value slot.
pub struct TripStore {
    trips: Vec<Trip>,
    selected: Option<TripId>,
    last_id: TripId,
    slot: Box<dyn KeyValueSlot>,
    clock: Box<dyn Clock>,
    config: StoreConfig,
    views: Option<ViewCache>,
}

impl TripStore {
    /// Seeds a store from `slot` using the system clock.
    ///
    /// A missing, unreadable, or malformed snapshot yields an empty store.
    pub fn load(slot: Box<dyn KeyValueSlot>, config: StoreConfig) -> Self {
        Self::load_with_clock(slot, config, Box::new(SystemClock))
    }

    /// Same as [`TripStore::load`] with an injected clock.
    pub fn load_with_clock(slot: Box<dyn KeyValueSlot>, config: StoreConfig, clock: Box<dyn Clock>) -> Self {
        let trips = read_snapshot(&*slot, &config.slot_key);
        let last_id = trips.iter().map(|t| t.id).max().unwrap_or(0);
        let views = config.cache_views.then(ViewCache::new);
        debug!(key = %config.slot_key, count = trips.len(), "trip store loaded");

        Self {
            trips,
            selected: None,
            last_id,
            slot,
            clock,
            config,
            views,
        }
    }

    /// Creates a trip from `draft`, prepends it, and persists.
    pub fn add(&mut self, draft: TripDraft) -> Result<Saved<TripId>, StoreError> {
        let id = self.next_id();
        let created_at = display_date(self.clock.today());
        let trip = draft.into_trip(id, created_at)?;
        debug!(id, destination = %trip.destination, "trip added");

        self.trips.insert(0, trip);
        self.last_id = id;
        let warning = self.after_mutation();
        Ok(Saved { value: id, warning })
    }

    /// Merges `patch` into the trip with `id` and persists.
    ///
    /// Returns `false` without touching the slot when no trip matches. The
    /// selection is cleared either way.
    pub fn edit(&mut self, id: TripId, patch: TripPatch) -> Result<Saved<bool>, StoreError> {
        patch.validate()?;
        self.selected = None;

        let Some(trip) = self.trips.iter_mut().find(|t| t.id == id) else {
            debug!(id, "edit ignored, no such trip");
            return Ok(Saved {
                value: false,
                warning: None,
            });
        };

        patch.apply_to(trip);
        debug!(id, "trip edited");
        let warning = self.after_mutation();
        Ok(Saved { value: true, warning })
    }

    /// Removes the trip with `id` and persists; unknown ids are a no-op.
    pub fn delete(&mut self, id: TripId) -> Saved<Option<Trip>> {
        let Some(pos) = self.trips.iter().position(|t| t.id == id) else {
            return Saved {
                value: None,
                warning: None,
            };
        };

        let removed = self.trips.remove(pos);
        if self.selected == Some(id) {
            self.selected = None;
        }
        debug!(id, "trip deleted");
        let warning = self.after_mutation();
        Saved {
            value: Some(removed),
            warning,
        }
    }

    /// Filtered, sorted view; recomputed on every call.
    pub fn query(&self, filter: CategoryFilter, sort: SortKey) -> Vec<&Trip> {
        view::filter_sorted(&self.trips, filter, sort)
    }

    /// Filtered, sorted view served from the view cache when enabled.
    pub fn view(&mut self, filter: CategoryFilter, sort: SortKey) -> Vec<&Trip> {
        match self.views.as_mut() {
            Some(cache) => cache
                .positions(&self.trips, filter, sort)
                .iter()
                .map(|idx| &self.trips[*idx])
                .collect(),
            None => view::filter_sorted(&self.trips, filter, sort),
        }
    }

    /// Overwrites the slot with the full collection.
    pub fn persist(&mut self) -> PersistResult<()> {
        let raw = snapshot::encode(&self.trips)?;
        self.slot.set(&self.config.slot_key, &raw)
    }

    pub fn get(&self, id: TripId) -> Option<&Trip> {
        self.trips.iter().find(|t| t.id == id)
    }

    /// Collection in stored (newest-first) order.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Points the detail view at `id`; returns the trip when it exists.
    pub fn select(&mut self, id: TripId) -> Option<&Trip> {
        let pos = self.trips.iter().position(|t| t.id == id)?;
        self.selected = Some(id);
        Some(&self.trips[pos])
    }

    pub fn selected(&self) -> Option<&Trip> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Days-until-trip bucket for `id` as of the store clock.
    pub fn countdown(&self, id: TripId) -> Option<Countdown> {
        let now = self.clock.now();
        self.get(id).map(|t| t.countdown(now))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Memoized views currently held, zero when caching is off.
    pub fn cached_views(&self) -> usize {
        self.views.as_ref().map_or(0, ViewCache::len)
    }

    // Timestamp-seeded but strictly above every id handed out or loaded.
    fn next_id(&self) -> TripId {
        self.clock.now_ms().max(self.last_id.saturating_add(1))
    }

    fn after_mutation(&mut self) -> Option<PersistError> {
        if let Some(cache) = self.views.as_mut() {
            cache.invalidate();
        }

        match self.persist() {
            Ok(()) => None,
            Err(err) => {
                warn!(key = %self.config.slot_key, error = %err, "trip snapshot not persisted; keeping in-memory state");
                Some(err)
            }
        }
    }
}

fn read_snapshot(slot: &dyn KeyValueSlot, key: &str) -> Vec<Trip> {
    let raw = match slot.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(key, error = %err, "trip slot unreadable; starting empty");
            return Vec::new();
        }
    };

    let trips = match snapshot::decode(&raw) {
        Ok(trips) => trips,
        Err(err) => {
            warn!(key, error = %err, "trip snapshot malformed; starting empty");
            return Vec::new();
        }
    };

    let mut seen = HashSet::with_capacity(trips.len());
    let before = trips.len();
    let trips: Vec<Trip> = trips.into_iter().filter(|t| seen.insert(t.id)).collect();
    if trips.len() != before {
        warn!(key, dropped = before - trips.len(), "duplicate trip ids in snapshot; kept first occurrence");
    }
    trips
}
