//! History sub-client: chart series.

use crate::client::DashboardClient;
use crate::domain::history::HistoricalSeries;
use crate::error::DashboardError;
use crate::shared::Asset;

/// Sub-client for historical price operations.
pub struct HistoryClient<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> HistoryClient<'a> {
    /// Series covering the last `days` days. A zero window is sent as one day.
    pub async fn get(&self, asset: Asset, days: u32) -> Result<HistoricalSeries, DashboardError> {
        let resp = self.client.http.get_historical(asset, days.max(1)).await?;
        resp.try_into()
    }
}
