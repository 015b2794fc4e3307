//! Watchlist storage for parcelwatch.
//!
//! This crate provides a trait-based store for watched shipments with a
//! SQLite implementation.

#![warn(missing_docs)]

pub mod trait_;
pub mod sqlite_storage;

pub use trait_::{ShipmentStore, StorageError, Result};
pub use sqlite_storage::SqliteStore;
