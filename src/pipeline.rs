//! Update pipeline: one fetch-and-render cycle.
//!
//! A cycle sets the status to connecting, fetches both quotes, writes every
//! present field, fetches and redraws both charts, then marks the status
//! connected and stamps the update time. Only the price fetch can fail a cycle.
//!
//! The shared [`DashboardState`] sits behind an async mutex that is locked
//! between fetches and never across one, so overlapping cycles interleave with
//! last-writer-wins on each field.

use crate::dashboard::DashboardState;
use crate::display::{ChangeDirection, DisplaySurface};
use crate::domain::history::{ChartSink, HistoricalSeries};
use crate::domain::price::{PricePoint, PriceSnapshot};
use crate::domain::status::ConnectionStatus;
use crate::error::DashboardError;
use crate::shared::fmt::{
    format_large_number, format_percentage, format_price, format_update_time,
};
use crate::shared::{Asset, SecondaryMetric};

use async_lock::Mutex;
use async_trait::async_trait;
use chrono::Local;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Message surfaced when the price fetch fails.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch price data. Please check your connection.";

/// Where a cycle gets its data.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait PriceSource {
    /// Current quotes for both assets.
    async fn fetch_prices(&self) -> Result<PriceSnapshot, DashboardError>;

    /// Historical series for one asset over the last `days` days.
    async fn fetch_history(&self, asset: Asset, days: u32)
        -> Result<HistoricalSeries, DashboardError>;
}

/// What to do with a trigger that arrives while a cycle is still running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CyclePolicy {
    /// Run it anyway; the two cycles interleave.
    #[default]
    Overlap,
    /// Drop it.
    SkipWhileInFlight,
}

/// Counts from a completed cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub assets_rendered: usize,
    pub charts_replaced: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Completed(CycleReport),
    /// Dropped by [`CyclePolicy::SkipWhileInFlight`].
    Skipped,
}

/// Runs refresh cycles against a price source and a shared dashboard state.
pub struct UpdatePipeline<P, D, K> {
    source: Arc<P>,
    state: Arc<Mutex<DashboardState<D, K>>>,
    policy: CyclePolicy,
    in_flight: Arc<AtomicBool>,
}

impl<P, D, K> Clone for UpdatePipeline<P, D, K> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            state: self.state.clone(),
            policy: self.policy,
            in_flight: self.in_flight.clone(),
        }
    }
}

impl<P, D, K> UpdatePipeline<P, D, K>
where
    P: PriceSource,
    D: DisplaySurface,
    K: ChartSink,
{
    pub fn new(source: P, state: DashboardState<D, K>) -> Self {
        Self {
            source: Arc::new(source),
            state: Arc::new(Mutex::new(state)),
            policy: CyclePolicy::default(),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_policy(mut self, policy: CyclePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> CyclePolicy {
        self.policy
    }

    pub fn source(&self) -> &P {
        &self.source
    }

    /// Shared state, for front-ends that read it back.
    pub fn state(&self) -> &Arc<Mutex<DashboardState<D, K>>> {
        &self.state
    }

    /// Run one full cycle.
    ///
    /// Returns the price fetch error if that fetch failed; by then the status
    /// is disconnected and the error message has been shown. History failures
    /// never fail the cycle.
    pub async fn run_cycle(&self) -> Result<CycleOutcome, DashboardError> {
        let _guard = match self.policy {
            CyclePolicy::Overlap => None,
            CyclePolicy::SkipWhileInFlight => match InFlight::acquire(&self.in_flight) {
                Some(guard) => Some(guard),
                None => {
                    tracing::debug!("Refresh cycle skipped, previous cycle still running");
                    return Ok(CycleOutcome::Skipped);
                }
            },
        };

        self.state
            .lock()
            .await
            .set_status(ConnectionStatus::Connecting);

        let snapshot = match self.source.fetch_prices().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!("Error fetching prices: {}", e);
                let mut state = self.state.lock().await;
                state.set_status(ConnectionStatus::Disconnected);
                state.display.show_error(FETCH_ERROR_MESSAGE);
                return Err(e);
            }
        };

        let assets_rendered = {
            let mut state = self.state.lock().await;
            for (asset, point) in snapshot.iter() {
                render_quote(&mut state.display, asset, point);
            }
            snapshot.len()
        };

        let charts_replaced = self.refresh_charts().await;

        {
            let mut state = self.state.lock().await;
            state.set_status(ConnectionStatus::Connected);
            let now = Local::now().naive_local();
            state.last_update = Some(now);
            state.display.set_last_update(&format_update_time(&now));
        }

        let report = CycleReport {
            assets_rendered,
            charts_replaced,
        };
        tracing::info!(
            assets = report.assets_rendered,
            charts = report.charts_replaced,
            "Refresh cycle completed"
        );
        Ok(CycleOutcome::Completed(report))
    }

    /// Store a new day range and redraw both charts with it.
    pub async fn set_days(&self, days: u32) -> usize {
        self.state.lock().await.days = days.max(1);
        self.refresh_charts().await
    }

    /// Fetch and redraw both charts at the current day range.
    ///
    /// Each asset is handled on its own: a failure is logged and leaves that
    /// chart as it was. Returns how many charts were replaced.
    pub async fn refresh_charts(&self) -> usize {
        let days = self.state.lock().await.days;
        let mut replaced = 0;

        for asset in Asset::ALL {
            let history = match self.source.fetch_history(asset, days).await {
                Ok(history) => history,
                Err(e) => {
                    tracing::warn!(%asset, "Error fetching historical data: {}", e);
                    continue;
                }
            };

            let mut state = self.state.lock().await;
            match state.charts.show_history(asset, history, days) {
                Ok(()) => replaced += 1,
                Err(e) => tracing::warn!(%asset, "Chart not updated: {}", e),
            }
        }

        replaced
    }
}

/// Write one asset's quote into the display. Absent fields are left alone.
///
/// A quote carrying an upstream error holds placeholder zeros, not data: only
/// the card's error state is updated and the previous fields stay on screen.
fn render_quote<D: DisplaySurface>(display: &mut D, asset: Asset, point: &PricePoint) {
    if let Some(upstream) = &point.upstream_error {
        tracing::warn!(%asset, "Backend reported upstream error: {}", upstream);
        display.set_card_error(asset, true);
        return;
    }

    if point.price.is_some() {
        display.set_price(asset, &format_price(point.price));
    }
    if point.change_24h.is_some() {
        display.set_change(
            asset,
            &format_percentage(point.change_24h),
            ChangeDirection::from_change(point.change_24h),
        );
    }

    let metric = asset.secondary_metric();
    if let Some(value) = point.secondary(metric) {
        let text = match metric {
            SecondaryMetric::MarketCap => format_large_number(value),
            SecondaryMetric::PrevClose => format_price(value),
        };
        display.set_secondary(asset, metric, &text);
    }
    display.set_card_error(asset, false);
}

/// Clears the in-flight flag when the cycle ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
