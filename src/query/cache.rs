use hashbrown::HashMap;

use crate::{
    trip::Trip,
    types::{CategoryFilter, SortKey},
};

use super::view;

/// Per-(filter, sort) memo of collection positions.
///
/// Positions are only meaningful for the collection they were computed from;
/// the owner must call [`ViewCache::invalidate`] on every mutation.
#[derive(Debug, Default)]
pub struct ViewCache {
    views: HashMap<(CategoryFilter, SortKey), Vec<usize>>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Memoized [`view::positions`] for `trips`.
    pub fn positions(&mut self, trips: &[Trip], filter: CategoryFilter, sort: SortKey) -> &[usize] {
        self.views
            .entry((filter, sort))
            .or_insert_with(|| view::positions(trips, filter, sort))
    }

    pub fn invalidate(&mut self) {
        self.views.clear();
    }

    /// Number of memoized views.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
