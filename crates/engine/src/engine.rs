//! The refresh engine - track one shipment, or refresh the whole watchlist.

use parcelwatch_core::{detect, Shipment, TrackInput};
use parcelwatch_storage::ShipmentStore;
use parcelwatch_tracking::TrackingClient;
use tracing::{debug, info, warn};

use crate::error::{EngineError, Result};
use crate::report::{RefreshEntry, RefreshReport, TrackReport};

/// Configuration for the refresh engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// History entries kept in a [`TrackReport`]
    pub history_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { history_limit: 2 }
    }
}

/// The refresh engine.
///
/// Per shipment:
/// ```text
/// CREATED → ACTIVE (status ≠ DELIVERED) → RETIRED (DELIVERED, row deleted)
/// ```
/// A failed query leaves an active shipment untouched. Retirement is one-way;
/// submitting the same number again starts a new watch.
///
/// Concurrent calls racing on the same tracking number resolve as
/// last-writer-wins.
pub struct RefreshEngine<C: TrackingClient, S: ShipmentStore> {
    client: C,
    store: S,
    config: EngineConfig,
}

impl<C: TrackingClient, S: ShipmentStore> RefreshEngine<C, S> {
    /// Create a new engine over a tracking client and a watchlist store.
    pub fn new(client: C, store: S) -> Self {
        Self {
            client,
            store,
            config: EngineConfig::default(),
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// The watchlist store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Track a free-text `<awb> [alias...]` line with an auto-detected courier.
    pub async fn track_one(&self, raw_input: &str, api_key: &str) -> Result<TrackReport> {
        let input = TrackInput::parse(raw_input);

        let Some(courier) = detect(&input.tracking_number) else {
            debug!("No courier matches '{}'", input.tracking_number);
            return Err(EngineError::Detection {
                input: input.tracking_number,
            });
        };

        debug!("Detected courier {} for {}", courier, input.tracking_number);
        self.query_and_maybe_save(courier.as_str(), &input.tracking_number, &input.alias, api_key)
            .await
    }

    /// Query one shipment with an explicit courier, watching it unless delivered.
    ///
    /// Query failures are returned unchanged and nothing is persisted. A
    /// watchlist write failure is logged and does not affect the report.
    pub async fn query_and_maybe_save(
        &self,
        courier: &str,
        tracking_number: &str,
        alias: &str,
        api_key: &str,
    ) -> Result<TrackReport> {
        let shipment = Shipment::new(courier, tracking_number, alias);

        let result = self
            .client
            .query(&shipment.courier, &shipment.tracking_number, api_key)
            .await?;

        let report = TrackReport::from_result(&shipment, &result, self.config.history_limit);

        if result.is_delivered() {
            info!("{} already delivered, not watching", shipment.tracking_number);
        } else {
            self.save(&shipment).await;
        }

        Ok(report)
    }

    /// Re-query every watched shipment, retiring the delivered ones.
    ///
    /// Shipments are processed one at a time; a failed query becomes a
    /// [`RefreshEntry::Failed`] and the batch carries on. Only a failure to read
    /// the watchlist itself is returned as an error.
    pub async fn refresh_all(&self, api_key: &str) -> Result<RefreshReport> {
        let shipments = self.store.list_all().await?;
        let mut report = RefreshReport::new();

        if shipments.is_empty() {
            info!("Watchlist is empty, nothing to refresh");
            return Ok(report);
        }

        info!("Refreshing {} watched shipments", shipments.len());
        for shipment in &shipments {
            let entry = self.refresh_one(shipment, api_key).await;
            report.entries.push(entry);
        }

        let counts = report.counts();
        info!(
            "Refresh done: {} active, {} retired, {} failed",
            counts.active, counts.retired, counts.failed
        );

        Ok(report)
    }

    /// Current watchlist, for display. No network calls.
    pub async fn watchlist(&self) -> Result<Vec<Shipment>> {
        Ok(self.store.list_all().await?)
    }

    /// One watched shipment by tracking number, for display. No network calls.
    pub async fn watched(&self, tracking_number: &str) -> Result<Option<Shipment>> {
        Ok(self.store.get(tracking_number).await?)
    }

    async fn refresh_one(&self, shipment: &Shipment, api_key: &str) -> RefreshEntry {
        let result = self
            .client
            .query(&shipment.courier, &shipment.tracking_number, api_key)
            .await;

        match result {
            Err(e) => {
                warn!("Failed to update {}: {}", shipment.tracking_number, e);
                RefreshEntry::Failed {
                    alias: shipment.alias.clone(),
                    tracking_number: shipment.tracking_number.clone(),
                    reason: e.to_string(),
                }
            }
            Ok(result) if result.is_delivered() => {
                self.retire(shipment).await;
                RefreshEntry::Retired {
                    alias: shipment.alias.clone(),
                    tracking_number: shipment.tracking_number.clone(),
                }
            }
            Ok(result) => RefreshEntry::Active {
                alias: shipment.alias.clone(),
                tracking_number: shipment.tracking_number.clone(),
                courier: shipment.courier.clone(),
                status: result.summary.normalized_status(),
                last_position: result.latest().map(|h| h.description.clone()),
            },
        }
    }

    async fn save(&self, shipment: &Shipment) {
        match self.store.upsert(shipment).await {
            Ok(()) => info!("Watching {} ({})", shipment.tracking_number, shipment.courier),
            Err(e) => warn!("Could not save {} to watchlist: {}", shipment.tracking_number, e),
        }
    }

    async fn retire(&self, shipment: &Shipment) {
        match self.store.delete(&shipment.tracking_number).await {
            Ok(()) => info!("{} delivered, removed from watchlist", shipment.tracking_number),
            Err(e) => warn!(
                "{} delivered but could not be removed from watchlist: {}",
                shipment.tracking_number, e
            ),
        }
    }
}
