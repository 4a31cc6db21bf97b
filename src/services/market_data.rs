//! Reference market data seeding
//!
//! Upserts one benchmark row per supported asset class at startup so the
//! dashboard's market panel has data on a fresh install. Upsert by natural
//! key keeps this idempotent across restarts.

use std::sync::Arc;

use sea_orm::DbErr;

use crate::models::market::MarketDataUpsert;
use crate::storage::Storage;

fn default_rows() -> Vec<MarketDataUpsert> {
    vec![
        MarketDataUpsert {
            asset_type: "real_estate".to_string(),
            symbol: "RE-INDEX".to_string(),
            price: 245.67,
            price_change_24h: 1.23,
            volume_24h: 15_600_000.0,
            market_cap: Some(2_450_000_000.0),
        },
        MarketDataUpsert {
            asset_type: "bonds".to_string(),
            symbol: "BOND-ETF".to_string(),
            price: 98.45,
            price_change_24h: -0.15,
            volume_24h: 8_900_000.0,
            market_cap: Some(985_000_000.0),
        },
        MarketDataUpsert {
            asset_type: "invoices".to_string(),
            symbol: "INV-POOL".to_string(),
            price: 1.02,
            price_change_24h: 0.05,
            volume_24h: 2_300_000.0,
            market_cap: Some(120_000_000.0),
        },
        MarketDataUpsert {
            asset_type: "commodities".to_string(),
            symbol: "GOLD-TKN".to_string(),
            price: 1945.30,
            price_change_24h: 0.82,
            volume_24h: 45_000_000.0,
            market_cap: Some(9_800_000_000.0),
        },
    ]
}

pub async fn seed_market_data(storage: &Arc<dyn Storage>) -> Result<(), DbErr> {
    for row in default_rows() {
        storage.upsert_market_data(&row).await?;
    }
    tracing::info!("market data seeded for {} asset classes", default_rows().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemStorage;

    #[tokio::test]
    async fn seeding_twice_keeps_one_row_per_key() {
        let storage: Arc<dyn Storage> = Arc::new(MemStorage::new());

        seed_market_data(&storage).await.unwrap();
        seed_market_data(&storage).await.unwrap();

        let rows = storage.list_market_data(None).await.unwrap();
        assert_eq!(rows.len(), 4);

        let bonds = storage.list_market_data(Some("bonds")).await.unwrap();
        assert_eq!(bonds.len(), 1);
        assert_eq!(bonds[0].symbol, "BOND-ETF");
    }
}
