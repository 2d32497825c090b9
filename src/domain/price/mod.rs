//! Price domain: current quotes for both assets.

#[cfg(feature = "http")]
pub mod client;
pub mod convert;
pub mod wire;

use crate::shared::{Asset, SecondaryMetric};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// Current quote for one asset, as received in one fetch.
///
/// Every numeric field is optional: a missing field means "no update for this
/// display field", never a failed cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricePoint {
    pub price: Option<f64>,
    pub change_24h: Option<f64>,
    pub market_cap: Option<f64>,
    pub prev_close: Option<f64>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    /// Set when the backend could not reach its upstream quote provider.
    pub upstream_error: Option<String>,
}

impl PricePoint {
    pub fn new(price: f64, change_24h: f64) -> Self {
        Self {
            price: Some(price),
            change_24h: Some(change_24h),
            ..Self::default()
        }
    }

    pub fn with_market_cap(mut self, market_cap: f64) -> Self {
        self.market_cap = Some(market_cap);
        self
    }

    pub fn with_prev_close(mut self, prev_close: f64) -> Self {
        self.prev_close = Some(prev_close);
        self
    }

    /// The secondary figure, if present and meaningful. The backend reports a
    /// missing market cap as zero, so zero counts as absent.
    pub fn secondary(&self, metric: SecondaryMetric) -> Option<f64> {
        let value = match metric {
            SecondaryMetric::MarketCap => self.market_cap,
            SecondaryMetric::PrevClose => self.prev_close,
        };
        value.filter(|v| *v != 0.0 && !v.is_nan())
    }
}

/// Decoded `/api/prices` body: one optional quote per asset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSnapshot {
    /// Server-side time of the response, when it parsed.
    pub server_time: Option<NaiveDateTime>,
    quotes: BTreeMap<Asset, PricePoint>,
}

impl PriceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, asset: Asset, point: PricePoint) -> Self {
        self.quotes.insert(asset, point);
        self
    }

    pub fn get(&self, asset: Asset) -> Option<&PricePoint> {
        self.quotes.get(&asset)
    }

    /// Quotes present in the response, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Asset, &PricePoint)> {
        self.quotes.iter().map(|(asset, point)| (*asset, point))
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}
