//! Wire types for historical series (REST).

use serde::{Deserialize, Serialize};

/// `GET /api/historical/{asset}?days=N`
///
/// The backend answers an upstream failure with empty arrays rather than an
/// error status, so both fields are optional and may legitimately be empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoricalResponse {
    #[serde(default)]
    pub timestamps: Option<Vec<String>>,
    #[serde(default)]
    pub prices: Option<Vec<f64>>,
    #[serde(default)]
    pub error: Option<String>,
}
