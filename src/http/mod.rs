//! HTTP client layer: `DashboardHttp` with a per-client retry policy.

pub mod client;
pub mod retry;

pub use client::{DashboardHttp, HealthResponse};
pub use retry::{RetryConfig, RetryPolicy};
