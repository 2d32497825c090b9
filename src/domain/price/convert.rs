//! Conversions from wire types to domain types for prices.

use super::wire::{PriceData, PricesResponse};
use super::{PricePoint, PriceSnapshot};
use crate::shared::fmt::parse_instant;
use crate::shared::Asset;

impl From<PriceData> for PricePoint {
    fn from(d: PriceData) -> Self {
        Self {
            price: d.price,
            change_24h: d.change_24h,
            market_cap: d.market_cap,
            prev_close: d.prev_close,
            symbol: d.symbol,
            name: d.name,
            upstream_error: d.error,
        }
    }
}

impl From<PricesResponse> for PriceSnapshot {
    fn from(r: PricesResponse) -> Self {
        let mut snapshot = PriceSnapshot::new();
        snapshot.server_time = r.timestamp.as_deref().and_then(parse_instant);
        if let Some(btc) = r.data.btc {
            snapshot = snapshot.with(Asset::Btc, btc.into());
        }
        if let Some(sp500) = r.data.sp500 {
            snapshot = snapshot.with(Asset::Sp500, sp500.into());
        }
        snapshot
    }
}
