//! Full-collection snapshot codec.
//!
//! The slot holds a bare JSON array of trips with camelCase field names and
//! no version envelope.

use crate::trip::Trip;

use super::PersistResult;

/// Serializes the whole collection in stored order.
pub fn encode(trips: &[Trip]) -> PersistResult<String> {
    Ok(serde_json::to_string(trips)?)
}

/// Parses a slot value back into trips, preserving order.
pub fn decode(raw: &str) -> PersistResult<Vec<Trip>> {
    Ok(serde_json::from_str(raw)?)
}
