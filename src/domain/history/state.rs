//! Chart state containers: app-owned series, sink-provided redraw.

use super::HistoricalSeries;
use crate::error::ChartError;
use crate::shared::Asset;
use std::collections::BTreeMap;

/// The series currently displayed on one chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl ChartSeries {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Lowest and highest value, ignoring NaN.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Where a chart gets drawn.
///
/// Implementations must redraw in place without replaying entry animations.
pub trait ChartSink {
    fn redraw(&mut self, asset: Asset, series: &ChartSeries) -> Result<(), ChartError>;
}

/// Sink that draws nothing (headless use, tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopChartSink;

impl ChartSink for NoopChartSink {
    fn redraw(&mut self, _asset: Asset, _series: &ChartSeries) -> Result<(), ChartError> {
        Ok(())
    }
}

/// An absent sink draws nothing.
impl<K: ChartSink> ChartSink for Option<K> {
    fn redraw(&mut self, asset: Asset, series: &ChartSeries) -> Result<(), ChartError> {
        match self {
            Some(sink) => sink.redraw(asset, series),
            None => Ok(()),
        }
    }
}

/// Both charts plus the sink that renders them.
#[derive(Debug)]
pub struct ChartSurface<K> {
    sink: K,
    series: BTreeMap<Asset, ChartSeries>,
    redraws: BTreeMap<Asset, u64>,
}

impl<K: ChartSink> ChartSurface<K> {
    /// Both charts start empty.
    pub fn new(sink: K) -> Self {
        Self {
            sink,
            series: Asset::ALL
                .iter()
                .map(|asset| (*asset, ChartSeries::default()))
                .collect(),
            redraws: BTreeMap::new(),
        }
    }

    /// Swap in a new series for `asset` and redraw it.
    ///
    /// Mismatched lengths are rejected and the displayed series is left as is.
    /// A failed redraw is logged; the new series stays in place.
    pub fn replace_series(
        &mut self,
        asset: Asset,
        labels: Vec<String>,
        values: Vec<f64>,
    ) -> Result<(), ChartError> {
        if labels.len() != values.len() {
            return Err(ChartError::LengthMismatch {
                asset,
                labels: labels.len(),
                values: values.len(),
            });
        }

        let series = ChartSeries { labels, values };
        if let Err(e) = self.sink.redraw(asset, &series) {
            tracing::warn!(%asset, "Chart redraw failed: {}", e);
        }
        self.series.insert(asset, series);
        *self.redraws.entry(asset).or_default() += 1;
        Ok(())
    }

    /// Replace `asset`'s chart with a fetched history, labelled for `days`.
    pub fn show_history(
        &mut self,
        asset: Asset,
        history: HistoricalSeries,
        days: u32,
    ) -> Result<(), ChartError> {
        let labels = history.chart_labels(days);
        let (_, values) = history.into_parts();
        self.replace_series(asset, labels, values)
    }

    pub fn series(&self, asset: Asset) -> &ChartSeries {
        // Every asset is seeded in `new`.
        &self.series[&asset]
    }

    /// Number of successful replacements for `asset`.
    pub fn redraw_count(&self, asset: Asset) -> u64 {
        self.redraws.get(&asset).copied().unwrap_or(0)
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }
}
