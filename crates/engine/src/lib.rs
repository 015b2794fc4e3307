//! Shipment refresh engine.
//!
//! Orchestrates "track one" and "refresh all" over the courier detector, the
//! tracking client and the watchlist store, and retires delivered shipments.

#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod report;

pub use engine::{EngineConfig, RefreshEngine};
pub use error::{EngineError, Result};
pub use report::{RefreshCounts, RefreshEntry, RefreshReport, TrackReport};
