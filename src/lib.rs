//! Trip collection manager mirrored to a single key-value slot.
//!
//! # Examples
//!
//! In-memory usage with [`core::store::TripStore`]:
//! ```
//! use chrono::NaiveDate;
//! use tripstore::{
//!     config::StoreConfig,
//!     core::store::TripStore,
//!     persist::memory::MemorySlot,
//!     trip::{TripDraft, TripPatch},
//!     types::{Category, CategoryFilter, SortKey},
//! };
//!
//! let mut store = TripStore::load(Box::new(MemorySlot::new()), StoreConfig::default());
//! let saved = store.add(TripDraft {
//!     destination: "Paris".to_string(),
//!     duration: 5,
//!     start_date: NaiveDate::from_ymd_opt(2025, 6, 1),
//!     budget: 2000.0,
//!     category: Category::Cultural,
//!     ..TripDraft::default()
//! }).expect("add");
//! assert!(saved.is_durable());
//!
//! let notes = TripPatch { notes: Some("book hotel".to_string()), ..TripPatch::default() };
//! let _ = store.edit(saved.value, notes).expect("edit");
//!
//! let cultural = store.query(CategoryFilter::Only(Category::Cultural), SortKey::Newest);
//! assert_eq!(cultural[0].notes, "book hotel");
//! ```
//!
//! Runtime usage with a SQLite slot:
//! ```no_run
//! use tripstore::{
//!     config::StoreConfig,
//!     core::store::TripStore,
//!     persist::sqlite::SqliteSlot,
//!     runtime::handle::{spawn_tripstore, RuntimeConfig},
//!     types::{CategoryFilter, SortKey},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let slot = SqliteSlot::open("trips.db").expect("open sqlite");
//! let store = TripStore::load(Box::new(slot), StoreConfig::default());
//! let handle = spawn_tripstore(store, RuntimeConfig::default());
//! let trips = handle.query(CategoryFilter::All, SortKey::BudgetLow).await.expect("query");
//! println!("{} trips planned", trips.len());
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![warn(missing_docs)]

/// Store configuration.
pub mod config;
/// Authoritative in-memory store and clock.
pub mod core;
/// Key-value slot abstraction, snapshot codec, and backends.
pub mod persist;
/// Filter/sort queries and the view cache.
pub mod query;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Trip records, drafts, patches, and validation.
pub mod trip;
/// Shared primitive types and enums.
pub mod types;
