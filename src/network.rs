//! API URL and endpoint constants.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Current prices for both assets.
pub const PRICES_PATH: &str = "/api/prices";

/// Current price for a single asset: `/api/price/{asset}`.
pub const PRICE_PATH: &str = "/api/price";

/// Historical series: `/api/historical/{asset}?days=N`.
pub const HISTORICAL_PATH: &str = "/api/historical";

/// Backend liveness probe.
pub const HEALTH_PATH: &str = "/health";
