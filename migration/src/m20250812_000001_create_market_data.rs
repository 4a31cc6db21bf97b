use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MarketData::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MarketData::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MarketData::AssetType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(MarketData::Symbol).string_len(32).not_null())
                    .col(ColumnDef::new(MarketData::Price).double().not_null())
                    .col(
                        ColumnDef::new(MarketData::PriceChange24h)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MarketData::Volume24h).double().not_null())
                    .col(ColumnDef::new(MarketData::MarketCap).double().null())
                    .col(
                        ColumnDef::new(MarketData::LastUpdated)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .to_owned(),
            )
            .await?;

        // Natural key, at most one live row per (asset_type, symbol)
        manager
            .create_index(
                Index::create()
                    .name("uq_market_data_asset_type_symbol")
                    .table(MarketData::Table)
                    .col(MarketData::AssetType)
                    .col(MarketData::Symbol)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MarketData::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MarketData {
    Table,
    Id,
    AssetType,
    Symbol,
    Price,
    PriceChange24h,
    Volume24h,
    MarketCap,
    LastUpdated,
}
