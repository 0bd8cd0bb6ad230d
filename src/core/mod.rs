//! In-memory authoritative store and its time source.

/// Wall-clock abstraction used for ids, creation dates, and countdowns.
pub mod clock;
/// Authoritative trip collection with slot persistence.
pub mod store;
