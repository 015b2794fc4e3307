//! Query failure taxonomy.

/// Result type for tracking queries.
pub type Result<T> = std::result::Result<T, TrackingError>;

/// Why a tracking query produced no result.
///
/// None of these are retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackingError {
    /// Connection failure or timeout before a full response arrived
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx transport status
    #[error("HTTP error {status}: {message}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Provider message, or the canonical reason phrase
        message: String,
    },

    /// Response body is not a JSON object
    #[error("unreadable response: {0}")]
    Parse(String),

    /// Body parsed but the provider's own status signals failure
    #[error("tracking API error: {message}")]
    ApiStatus {
        /// Provider status field, if present and numeric
        status: Option<u16>,
        /// Provider message
        message: String,
    },
}
