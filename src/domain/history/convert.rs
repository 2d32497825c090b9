//! Conversions from wire types to domain types for historical series.

use super::wire::HistoricalResponse;
use super::HistoricalSeries;
use crate::error::DashboardError;
use crate::shared::fmt::parse_instant;

impl TryFrom<HistoricalResponse> for HistoricalSeries {
    type Error = DashboardError;

    fn try_from(r: HistoricalResponse) -> Result<Self, Self::Error> {
        if let Some(error) = r.error {
            return Err(DashboardError::MalformedData(format!(
                "history endpoint reported: {}",
                error
            )));
        }
        let (Some(raw_timestamps), Some(prices)) = (r.timestamps, r.prices) else {
            return Err(DashboardError::MalformedData(
                "history response is missing timestamps or prices".to_string(),
            ));
        };

        let timestamps = raw_timestamps
            .iter()
            .map(|raw| {
                parse_instant(raw).ok_or_else(|| {
                    DashboardError::MalformedData(format!("unparsable timestamp: {}", raw))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        HistoricalSeries::new(timestamps, prices)
    }
}
