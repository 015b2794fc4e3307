//! SQLite storage backend for the watchlist.
//!
//! Uses a pool capped at a single connection, so every read and write is
//! serialized against one logical connection.

use async_trait::async_trait;
use parcelwatch_core::Shipment;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::Row;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use super::trait_::{Result, ShipmentStore};

/// SQLite storage implementation.
#[derive(Clone)]
pub struct SqliteStore {
    /// Database connection pool
    pool: sqlx::SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);

        Self::connect(options).await
    }

    /// Create an in-memory SQLite store for testing.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        Self::connect(options).await
    }

    async fn connect(options: SqliteConnectOptions) -> Result<Self> {
        // An in-memory database lives only as long as its connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;

        Ok(store)
    }

    /// Initialize the database schema.
    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS resi_data (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                courier TEXT,
                resi TEXT UNIQUE,
                alias TEXT
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Helper to extract a nullable string column from a row.
    fn get_string(row: &sqlx::sqlite::SqliteRow, column: &str) -> String {
        row.try_get::<Option<String>, _>(column)
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    fn shipment_from_row(row: &sqlx::sqlite::SqliteRow) -> Shipment {
        Shipment::new(
            Self::get_string(row, "courier"),
            Self::get_string(row, "resi"),
            Self::get_string(row, "alias"),
        )
    }

    /// Check if the database is healthy.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await.is_ok()
    }

    /// Close the pool, waiting for the connection to be released.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ShipmentStore for SqliteStore {
    async fn upsert(&self, shipment: &Shipment) -> Result<()> {
        let tracking_number = shipment.tracking_number.trim().to_uppercase();

        sqlx::query(
            "INSERT OR REPLACE INTO resi_data (courier, resi, alias)
            VALUES (?, ?, ?)",
        )
        .bind(shipment.courier.trim().to_lowercase())
        .bind(&tracking_number)
        .bind(&shipment.alias)
        .execute(&self.pool)
        .await?;

        debug!("Saved shipment {}", tracking_number);
        Ok(())
    }

    async fn delete(&self, tracking_number: &str) -> Result<()> {
        sqlx::query("DELETE FROM resi_data WHERE resi = ?")
            .bind(tracking_number.trim().to_uppercase())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Shipment>> {
        let rows = sqlx::query("SELECT courier, resi, alias FROM resi_data ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(Self::shipment_from_row).collect())
    }

    async fn get(&self, tracking_number: &str) -> Result<Option<Shipment>> {
        let row = sqlx::query("SELECT courier, resi, alias FROM resi_data WHERE resi = ?")
            .bind(tracking_number.trim().to_uppercase())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(Self::shipment_from_row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shoes() -> Shipment {
        Shipment::new("spx", "SPX999999", "My Shoes")
    }

    #[tokio::test]
    async fn test_upsert_and_list() {
        let store = SqliteStore::in_memory().await.unwrap();

        store.upsert(&shoes()).await.unwrap();
        store
            .upsert(&Shipment::new("jne", "0123456789", "Books"))
            .await
            .unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], shoes());
        assert_eq!(all[1].courier, "jne");
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent() {
        let store = SqliteStore::in_memory().await.unwrap();

        for _ in 0..3 {
            store.upsert(&shoes()).await.unwrap();
        }
        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_replaces_alias_and_courier() {
        let store = SqliteStore::in_memory().await.unwrap();

        store.upsert(&shoes()).await.unwrap();
        store
            .upsert(&Shipment::new("JNT", "spx999999", "Red Shoes"))
            .await
            .unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].courier, "jnt");
        assert_eq!(all[0].alias, "Red Shoes");
    }

    #[tokio::test]
    async fn test_delete() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.upsert(&shoes()).await.unwrap();

        // Absent key is a no-op
        store.delete("NOPE").await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 1);

        store.delete("spx999999").await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
        assert!(store.get("SPX999999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.upsert(&shoes()).await.unwrap();

        let loaded = store.get("spx999999").await.unwrap().unwrap();
        assert_eq!(loaded, shoes());
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resi_database.db");

        let store = SqliteStore::open(&path).await.unwrap();
        store.upsert(&shoes()).await.unwrap();
        store.close().await;

        // Schema creation is idempotent on an existing file
        let reopened = SqliteStore::open(&path).await.unwrap();
        assert_eq!(reopened.list_all().await.unwrap(), vec![shoes()]);
    }

    #[tokio::test]
    async fn test_health_check() {
        let store = SqliteStore::in_memory().await.unwrap();
        assert!(store.health_check().await);
    }
}
