//! Historical price domain: time series backing the two charts.

#[cfg(feature = "http")]
pub mod client;
pub mod convert;
pub mod state;
pub mod wire;

use crate::error::DashboardError;
use crate::shared::fmt::format_chart_date;
use chrono::NaiveDateTime;

pub use state::{ChartSeries, ChartSink, ChartSurface, NoopChartSink};

/// Aligned timestamps and prices: index `i` of one belongs to index `i` of the other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalSeries {
    timestamps: Vec<NaiveDateTime>,
    prices: Vec<f64>,
}

impl HistoricalSeries {
    pub fn new(timestamps: Vec<NaiveDateTime>, prices: Vec<f64>) -> Result<Self, DashboardError> {
        if timestamps.len() != prices.len() {
            return Err(DashboardError::MalformedData(format!(
                "history has {} timestamps but {} prices",
                timestamps.len(),
                prices.len()
            )));
        }
        Ok(Self { timestamps, prices })
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// X-axis labels at the granularity implied by `days`.
    pub fn chart_labels(&self, days: u32) -> Vec<String> {
        self.timestamps
            .iter()
            .map(|t| format_chart_date(t, days))
            .collect()
    }

    pub fn into_parts(self) -> (Vec<NaiveDateTime>, Vec<f64>) {
        (self.timestamps, self.prices)
    }
}
