//! parcelwatch core data models.
//!
//! This crate defines the shipment data structures and the pure courier
//! classification that the rest of the workspace builds on.

#![warn(missing_docs)]

// Carrier classification
mod courier;

// Watchlist and provider results
mod shipment;
mod tracking;

// Free-text boundary parsing
mod input;

// Re-exports
pub use courier::{detect, CourierCode};
pub use shipment::{Shipment, DEFAULT_ALIAS};
pub use tracking::{HistoryEntry, Summary, TrackingResult, DELIVERED};
pub use input::{InputError, ManualInput, TrackInput};
