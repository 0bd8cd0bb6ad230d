//! Filter/sort queries over the trip collection.

/// Memoized views keyed by filter and sort.
pub mod cache;
/// Pure filter and comparator functions.
pub mod view;
