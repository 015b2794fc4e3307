//! Engine errors surfaced to the caller.

use parcelwatch_storage::StorageError;
use parcelwatch_tracking::TrackingError;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Failures the caller is expected to render.
///
/// Watchlist write failures never appear here; they are logged and dropped.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// No courier could be inferred from the tracking number
    #[error("courier not detected for '{input}'; use: cek <courier> <awb> [name]")]
    Detection {
        /// The tracking number as parsed
        input: String,
    },

    /// The tracking query failed
    #[error(transparent)]
    Query(#[from] TrackingError),

    /// The watchlist could not be read
    #[error("watchlist unavailable: {0}")]
    Watchlist(#[from] StorageError),
}
