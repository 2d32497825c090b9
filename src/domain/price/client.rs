//! Prices sub-client: current quotes.

use crate::client::DashboardClient;
use crate::domain::price::{PricePoint, PriceSnapshot};
use crate::error::DashboardError;
use crate::shared::Asset;

/// Sub-client for price operations.
pub struct PricesClient<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> PricesClient<'a> {
    /// Both assets in one request.
    pub async fn all(&self) -> Result<PriceSnapshot, DashboardError> {
        let resp = self.client.http.get_prices().await?;
        Ok(resp.into())
    }

    /// A single asset.
    pub async fn get(&self, asset: Asset) -> Result<PricePoint, DashboardError> {
        let resp = self.client.http.get_price(asset).await?;
        Ok(resp.data.into())
    }
}
