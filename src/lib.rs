//! # Price Dashboard
//!
//! A polling dashboard for two assets (Bitcoin and the S&P 500) supporting
//! both native and WASM front-ends.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Formatters, domain types, chart surface, status (always available, WASM-safe)
//! 2. **Controller**: `RefreshController`, `UpdatePipeline`, `Dashboard`
//! 3. **HTTP API**: `DashboardHttp` with per-request retry policies
//! 4. **High-Level Client**: `DashboardClient` with nested sub-clients
//! 5. **Front-ends**: Compile-time dispatch: tokio + SVG charts (native) / DOM + gloo timers (WASM)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use price_dashboard::prelude::*;
//!
//! let client = DashboardClient::builder()
//!     .base_url("http://localhost:5000")
//!     .build()?;
//!
//! let pipeline = UpdatePipeline::new(client, DashboardState::new(Board::new(), NoopChartSink, 7));
//! let mut dashboard = price_dashboard::native::dashboard(pipeline);
//! dashboard.start(RefreshConfig::from_millis(30_000));
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared types and display formatters.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Display surface abstraction and the in-memory board.
pub mod display;

/// Unified error types.
pub mod error;

/// API URL and endpoint constants.
pub mod network;

// ── Layer 2: Controller ──────────────────────────────────────────────────────

/// Recurring refresh timer with page-visibility handling.
pub mod refresh;

/// One fetch-and-render cycle.
pub mod pipeline;

/// `Dashboard`: owns the pipeline, shared state and refresh controller.
pub mod dashboard;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `DashboardClient`: the price source used by the pipeline.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 5: Front-ends ──────────────────────────────────────────────────────

/// Environment-driven configuration for the native binary.
#[cfg(feature = "native")]
pub mod config;

/// Native front-end: tokio scheduler, console board, SVG charts.
#[cfg(feature = "native")]
pub mod native;

/// Browser front-end: DOM surface, interval timer, visibility listener.
#[cfg(feature = "wasm")]
pub mod web;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared types + formatters
    pub use crate::shared::fmt::{
        format_chart_date, format_large_number, format_percentage, format_price,
        format_update_time,
    };
    pub use crate::shared::{Asset, SecondaryMetric, DEFAULT_DAYS};

    // Domain types
    pub use crate::domain::history::{ChartSeries, ChartSink, ChartSurface, HistoricalSeries, NoopChartSink};
    pub use crate::domain::price::{PricePoint, PriceSnapshot};
    pub use crate::domain::status::{ConnectionStatus, StatusIndicator};

    // Display
    pub use crate::display::{AssetCard, Board, ChangeDirection, DisplaySurface};

    // Controller
    pub use crate::dashboard::{Dashboard, DashboardState};
    pub use crate::pipeline::{CycleOutcome, CyclePolicy, CycleReport, PriceSource, UpdatePipeline};
    pub use crate::refresh::{RefreshConfig, RefreshController, Scheduler};

    // Errors
    pub use crate::error::{ChartError, DashboardError, HttpError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{DashboardClient, DashboardClientBuilder};
    #[cfg(feature = "http")]
    pub use crate::domain::history::client::HistoryClient;
    #[cfg(feature = "http")]
    pub use crate::domain::price::client::PricesClient;
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
