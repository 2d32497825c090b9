//! Scripted price source shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use price_dashboard::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct ScriptedSource {
    pub fail_prices: AtomicBool,
    pub failing_history: Mutex<Vec<Asset>>,
    /// Assets quoted the way the backend does when its provider is down.
    pub upstream_down: Mutex<Vec<Asset>>,
    /// Virtual time each price fetch takes.
    pub price_delay_ms: AtomicU64,
    pub price_calls: AtomicUsize,
    pub history_calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn price_calls(&self) -> usize {
        self.price_calls.load(Ordering::SeqCst)
    }

    pub fn set_fail_prices(&self, fail: bool) {
        self.fail_prices.store(fail, Ordering::SeqCst);
    }

    pub fn fail_history_for(&self, assets: &[Asset]) {
        *self.failing_history.lock().unwrap() = assets.to_vec();
    }

    pub fn upstream_down_for(&self, assets: &[Asset]) {
        *self.upstream_down.lock().unwrap() = assets.to_vec();
    }
}

#[async_trait]
impl PriceSource for ScriptedSource {
    async fn fetch_prices(&self) -> Result<PriceSnapshot, DashboardError> {
        let call = self.price_calls.fetch_add(1, Ordering::SeqCst) as f64;
        let delay = self.price_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.fail_prices.load(Ordering::SeqCst) {
            return Err(HttpError::ServerError {
                status: 503,
                body: "unavailable".to_string(),
            }
            .into());
        }
        let snapshot = PriceSnapshot::new()
            .with(
                Asset::Btc,
                PricePoint::new(40_000.0 + call * 1000.0, 1.5).with_market_cap(8.47e11),
            )
            .with(
                Asset::Sp500,
                PricePoint::new(4_700.0 + call, -0.25).with_prev_close(4_712.5),
            );
        let down = self.upstream_down.lock().unwrap().clone();
        Ok(down.into_iter().fold(snapshot, |snapshot, asset| {
            snapshot.with(
                asset,
                PricePoint {
                    price: Some(0.0),
                    change_24h: Some(0.0),
                    upstream_error: Some("provider unreachable".to_string()),
                    ..PricePoint::default()
                },
            )
        }))
    }

    async fn fetch_history(
        &self,
        asset: Asset,
        _days: u32,
    ) -> Result<HistoricalSeries, DashboardError> {
        let call = self.history_calls.fetch_add(1, Ordering::SeqCst) as f64;
        if self.failing_history.lock().unwrap().contains(&asset) {
            return Err(HttpError::NotFound("no history".to_string()).into());
        }
        let day = |d| {
            NaiveDate::from_ymd_opt(2024, 1, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        HistoricalSeries::new(vec![day(4), day(5)], vec![call, call + 1.0])
    }
}
