//! Storage trait abstraction.

use async_trait::async_trait;
use parcelwatch_core::Shipment;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Database driver error
    #[error("Database error: {0}")]
    Database(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        StorageError::Database(e.to_string())
    }
}

/// Persistent watchlist keyed by tracking number.
///
/// Implementations serialize all operations against a single backing store.
#[async_trait]
pub trait ShipmentStore: Send + Sync {
    /// Insert a shipment, replacing any row with the same tracking number.
    async fn upsert(&self, shipment: &Shipment) -> Result<()>;

    /// Remove a shipment. No-op if absent.
    async fn delete(&self, tracking_number: &str) -> Result<()>;

    /// All watched shipments, in insertion order.
    async fn list_all(&self) -> Result<Vec<Shipment>>;

    /// Load one shipment by tracking number.
    async fn get(&self, tracking_number: &str) -> Result<Option<Shipment>>;
}
