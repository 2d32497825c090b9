//! High-level client: `DashboardClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the accessor methods and the
//! [`PriceSource`] implementation the update pipeline runs against.

use crate::domain::history::client::HistoryClient;
use crate::domain::history::HistoricalSeries;
use crate::domain::price::client::PricesClient;
use crate::domain::price::PriceSnapshot;
use crate::error::DashboardError;
use crate::http::{DashboardHttp, HealthResponse, RetryPolicy};
use crate::pipeline::PriceSource;
use crate::shared::Asset;

use async_trait::async_trait;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::history::client::HistoryClient as HistorySubClient;
pub use crate::domain::price::client::PricesClient as PricesSubClient;

/// Entry point for the dashboard API.
///
/// `client.prices()` and `client.history()` return sub-clients; the client
/// itself is the pipeline's price source.
#[derive(Clone)]
pub struct DashboardClient {
    pub(crate) http: DashboardHttp,
}

impl DashboardClient {
    pub fn builder() -> DashboardClientBuilder {
        DashboardClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn prices(&self) -> PricesClient<'_> {
        PricesClient { client: self }
    }

    pub fn history(&self) -> HistoryClient<'_> {
        HistoryClient { client: self }
    }

    /// Backend liveness probe.
    pub async fn health(&self) -> Result<HealthResponse, DashboardError> {
        Ok(self.http.health().await?)
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl PriceSource for DashboardClient {
    async fn fetch_prices(&self) -> Result<PriceSnapshot, DashboardError> {
        self.prices().all().await
    }

    async fn fetch_history(
        &self,
        asset: Asset,
        days: u32,
    ) -> Result<HistoricalSeries, DashboardError> {
        self.history().get(asset, days).await
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct DashboardClientBuilder {
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl Default for DashboardClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

impl DashboardClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Per-request timeout. Ignored on wasm32, where the browser owns it.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn build(self) -> Result<DashboardClient, DashboardError> {
        if self.base_url.trim().is_empty() {
            return Err(DashboardError::Config("API base URL is empty".to_string()));
        }
        Ok(DashboardClient {
            http: DashboardHttp::new(&self.base_url, self.timeout, self.retry)?,
        })
    }
}
