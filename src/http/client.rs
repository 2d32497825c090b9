//! Low-level HTTP client: `DashboardHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain types
//! happens in the sub-clients). Wrapped by `DashboardClient`.

use crate::domain::history::wire::HistoricalResponse;
use crate::domain::price::wire::{PriceResponse, PricesResponse};
use crate::error::HttpError;
use crate::http::retry::RetryPolicy;
use crate::network::{HEALTH_PATH, HISTORICAL_PATH, PRICES_PATH, PRICE_PATH};
use crate::shared::Asset;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Low-level HTTP client for the dashboard REST API.
#[derive(Clone)]
pub struct DashboardHttp {
    base_url: String,
    client: Client,
    retry: RetryPolicy,
}

impl DashboardHttp {
    pub fn new(base_url: &str, timeout: Duration, retry: RetryPolicy) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(timeout).pool_max_idle_per_host(4);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Prices ───────────────────────────────────────────────────────────

    pub async fn get_prices(&self) -> Result<PricesResponse, HttpError> {
        let url = format!("{}{}", self.base_url, PRICES_PATH);
        self.get(&url).await
    }

    pub async fn get_price(&self, asset: Asset) -> Result<PriceResponse, HttpError> {
        let url = format!("{}{}/{}", self.base_url, PRICE_PATH, asset.as_str());
        self.get(&url).await
    }

    // ── History ──────────────────────────────────────────────────────────

    pub async fn get_historical(
        &self,
        asset: Asset,
        days: u32,
    ) -> Result<HistoricalResponse, HttpError> {
        let url = format!(
            "{}{}/{}?days={}",
            self.base_url,
            HISTORICAL_PATH,
            asset.as_str(),
            days
        );
        self.get(&url).await
    }

    // ── Health ───────────────────────────────────────────────────────────

    pub async fn health(&self) -> Result<HealthResponse, HttpError> {
        let url = format!("{}{}", self.base_url, HEALTH_PATH);
        self.get(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let Some(config) = self.retry.config() else {
            return self.do_get(url).await;
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_get::<T>(url).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if !config.should_retry(&e) {
                        return Err(e);
                    }
                    if attempt == config.max_retries {
                        last_error = Some(e);
                        break;
                    }

                    let delay = match &e {
                        HttpError::RateLimited {
                            retry_after_ms: Some(ms),
                        } => Duration::from_millis(*ms),
                        _ => config.delay_for_attempt(attempt),
                    };
                    tracing::debug!(
                        attempt = attempt + 1,
                        max = config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying request to {}",
                        url
                    );
                    futures_timer::Delay::new(delay).await;
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        tracing::debug!("GET {}", url);
        let resp = self.client.get(url).send().await?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map(|secs| secs * 1000);
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            404 => Err(HttpError::NotFound(body_text)),
            408 => Err(HttpError::Timeout),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}
