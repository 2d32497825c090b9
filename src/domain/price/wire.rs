//! Wire types for price responses (REST).

use serde::{Deserialize, Serialize};

/// `GET /api/prices`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricesResponse {
    #[serde(default)]
    pub timestamp: Option<String>,
    pub data: PricesData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricesData {
    #[serde(default)]
    pub btc: Option<PriceData>,
    #[serde(default)]
    pub sp500: Option<PriceData>,
}

/// `GET /api/price/{asset}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceResponse {
    #[serde(default)]
    pub timestamp: Option<String>,
    pub data: PriceData,
}

/// One asset's quote as the backend sends it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceData {
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub change_24h: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub prev_close: Option<f64>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
