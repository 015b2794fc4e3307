//! Tracking client trait and the BinderByte HTTP implementation.

use async_trait::async_trait;
use parcelwatch_core::TrackingResult;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{Result, TrackingError};
use crate::response::{message_from_body, parse_response};

/// Default BinderByte tracking endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.binderbyte.com/v1/track";

/// Adapter to an external tracking API. One shipment per call.
#[async_trait]
pub trait TrackingClient: Send + Sync {
    /// Query the current status of one shipment.
    async fn query(
        &self,
        courier: &str,
        tracking_number: &str,
        api_key: &str,
    ) -> Result<TrackingResult>;
}

/// Configuration for [`BinderByteClient`].
#[derive(Debug, Clone)]
pub struct TrackingConfig {
    /// Endpoint URL, queried with `api_key`, `courier` and `awb`
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// BinderByte tracking API client.
#[derive(Clone)]
pub struct BinderByteClient {
    /// HTTP client
    client: Client,

    /// Endpoint and timeout
    config: TrackingConfig,
}

impl BinderByteClient {
    /// Create a new client.
    pub fn new(config: TrackingConfig) -> Self {
        Self {
            client: ClientBuilder::new()
                .timeout(config.timeout)
                .build()
                .unwrap_or_default(),
            config,
        }
    }
}

#[async_trait]
impl TrackingClient for BinderByteClient {
    async fn query(
        &self,
        courier: &str,
        tracking_number: &str,
        api_key: &str,
    ) -> Result<TrackingResult> {
        debug!("Querying {} for {} via {}", courier, tracking_number, self.config.base_url);

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[("api_key", api_key), ("courier", courier), ("awb", tracking_number)])
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| {
                // The URL carries the API key.
                let e = e.without_url();
                warn!("Tracking request for {} failed: {}", tracking_number, e);
                TrackingError::Network(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TrackingError::Network(e.without_url().to_string()))?;

        debug!("Provider answered {} for {} ({} bytes)", status, tracking_number, body.len());

        if !status.is_success() {
            let message = message_from_body(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
            warn!("Tracking API returned HTTP {} for {}: {}", status, tracking_number, message);
            return Err(TrackingError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        parse_response(&body)
    }
}
