//! Unified dashboard error types.

use crate::shared::Asset;
use thiserror::Error;

/// Top-level dashboard error.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),

    #[error("Malformed data: {0}")]
    MalformedData(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// HTTP-layer errors. Every variant is a transport failure from the
/// dashboard's point of view.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// Chart surface errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("{asset} series has {labels} labels but {values} values")]
    LengthMismatch {
        asset: Asset,
        labels: usize,
        values: usize,
    },

    #[error("Render failed: {0}")]
    Render(String),
}
