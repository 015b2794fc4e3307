//! Tracking provider adapter.
//!
//! One shipment per call: send the courier and tracking number to the
//! provider and normalize whatever comes back into a
//! [`parcelwatch_core::TrackingResult`].

#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod response;

pub use client::{BinderByteClient, TrackingClient, TrackingConfig, DEFAULT_BASE_URL};
pub use error::{Result, TrackingError};
pub use response::parse_response;
