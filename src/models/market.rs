use serde::Deserialize;

/// Upsert payload keyed by (asset_type, symbol)
#[derive(Debug, Clone)]
pub struct MarketDataUpsert {
    pub asset_type: String,
    pub symbol: String,
    pub price: f64,
    pub price_change_24h: f64,
    pub volume_24h: f64,
    pub market_cap: Option<f64>,
}

/// Query parameters for GET /api/market-data
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketDataQuery {
    pub asset_type: Option<String>,
}
