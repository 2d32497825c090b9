//! Refresh controller: one recurring timer, paused while the page is hidden.
//!
//! Timers come from a [`Scheduler`]; the controller only decides when one
//! should exist. Dropping a timer handle cancels it, so "cancel" is always
//! "drop the handle".

use crate::error::DashboardError;
use std::str::FromStr;
use std::time::Duration;

/// Refresh period in milliseconds. Zero disables the timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RefreshConfig {
    pub period_ms: u64,
}

impl RefreshConfig {
    pub const DISABLED: Self = Self { period_ms: 0 };

    pub fn from_millis(period_ms: u64) -> Self {
        Self { period_ms }
    }

    /// The timer period, or `None` when refreshing is disabled.
    pub fn period(&self) -> Option<Duration> {
        (self.period_ms > 0).then(|| Duration::from_millis(self.period_ms))
    }

    pub fn is_enabled(&self) -> bool {
        self.period_ms > 0
    }
}

impl FromStr for RefreshConfig {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self::from_millis)
            .map_err(|e| DashboardError::Config(format!("invalid refresh period {:?}: {}", s, e)))
    }
}

/// Source of recurring timers and immediate cycle triggers.
pub trait Scheduler {
    /// Live timer. Dropping it stops further firings.
    type Timer;

    /// Start a timer that fires a cycle every `period`, first firing one
    /// period from now.
    fn start_timer(&self, period: Duration) -> Self::Timer;

    /// Fire one cycle now, outside the timer.
    fn trigger_now(&self);
}

/// Owns the single active refresh timer.
pub struct RefreshController<S: Scheduler> {
    scheduler: S,
    active_timer: Option<S::Timer>,
    config: RefreshConfig,
}

impl<S: Scheduler> RefreshController<S> {
    /// A controller with no timer running.
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            active_timer: None,
            config: RefreshConfig::DISABLED,
        }
    }

    /// Cancel any running timer and start a new one at `config`'s period.
    /// A zero period leaves no timer running.
    pub fn set_period(&mut self, config: RefreshConfig) {
        self.active_timer = None;
        self.config = config;

        if let Some(period) = config.period() {
            self.active_timer = Some(self.scheduler.start_timer(period));
            tracing::info!(period_ms = config.period_ms, "Refresh timer started");
        } else {
            tracing::info!("Refresh timer disabled");
        }
    }

    /// Hidden: stop the timer, keeping the period. Visible: restart at the
    /// kept period and run one cycle right away.
    pub fn on_visibility_change(&mut self, hidden: bool) {
        if hidden {
            if self.active_timer.take().is_some() {
                tracing::debug!("Page hidden, refresh timer paused");
            }
        } else {
            tracing::debug!("Page visible, resuming refresh");
            self.set_period(self.config);
            self.scheduler.trigger_now();
        }
    }

    /// Run one cycle now without touching the timer.
    pub fn trigger_now(&self) {
        self.scheduler.trigger_now();
    }

    pub fn is_active(&self) -> bool {
        self.active_timer.is_some()
    }

    pub fn config(&self) -> RefreshConfig {
        self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}
