//! `Dashboard`: the controller built once at startup.
//!
//! It owns the update pipeline (and through it the shared display, chart and
//! status state) together with the refresh controller. Front-ends route user
//! controls and visibility events into its methods.

use crate::display::DisplaySurface;
use crate::domain::history::{ChartSink, ChartSurface};
use crate::domain::status::{ConnectionStatus, StatusIndicator};
use crate::error::DashboardError;
use crate::pipeline::{CycleOutcome, PriceSource, UpdatePipeline};
use crate::refresh::{RefreshConfig, RefreshController, Scheduler};
use chrono::NaiveDateTime;

/// Everything a cycle writes to.
#[derive(Debug)]
pub struct DashboardState<D, K> {
    pub display: D,
    pub charts: ChartSurface<K>,
    pub status: StatusIndicator,
    /// Day range for the history fetch and chart labels.
    pub days: u32,
    /// Wall-clock time of the last completed cycle.
    pub last_update: Option<NaiveDateTime>,
}

impl<D: DisplaySurface, K: ChartSink> DashboardState<D, K> {
    pub fn new(display: D, sink: K, days: u32) -> Self {
        Self {
            display,
            charts: ChartSurface::new(sink),
            status: StatusIndicator::new(),
            days: days.max(1),
            last_update: None,
        }
    }

    /// Record the status and mirror it to the display.
    pub fn set_status(&mut self, status: ConnectionStatus) {
        self.status.set_status(status);
        self.display.set_status(status);
    }
}

pub struct Dashboard<P, D, K, S: Scheduler> {
    pipeline: UpdatePipeline<P, D, K>,
    refresh: RefreshController<S>,
}

impl<P, D, K, S> Dashboard<P, D, K, S>
where
    P: PriceSource,
    D: DisplaySurface,
    K: ChartSink,
    S: Scheduler,
{
    /// `scheduler` must fire cycles on `pipeline` (or a clone of it).
    pub fn new(pipeline: UpdatePipeline<P, D, K>, scheduler: S) -> Self {
        Self {
            pipeline,
            refresh: RefreshController::new(scheduler),
        }
    }

    /// Run the first cycle right away and start the refresh timer.
    pub fn start(&mut self, config: RefreshConfig) {
        tracing::info!(period_ms = config.period_ms, "Dashboard starting");
        self.refresh.trigger_now();
        self.refresh.set_period(config);
    }

    /// Refresh-period control changed.
    pub fn set_refresh(&mut self, config: RefreshConfig) {
        self.refresh.set_period(config);
    }

    pub fn on_visibility_change(&mut self, hidden: bool) {
        self.refresh.on_visibility_change(hidden);
    }

    /// Day-range control changed: store it and redraw both charts.
    pub async fn set_days(&self, days: u32) -> usize {
        self.pipeline.set_days(days).await
    }

    /// Run one cycle inline and wait for it.
    pub async fn refresh_now(&self) -> Result<CycleOutcome, DashboardError> {
        self.pipeline.run_cycle().await
    }

    pub fn pipeline(&self) -> &UpdatePipeline<P, D, K> {
        &self.pipeline
    }

    pub fn refresh(&self) -> &RefreshController<S> {
        &self.refresh
    }
}
