use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RwaProjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RwaProjects::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RwaProjects::Name).text().not_null())
                    .col(ColumnDef::new(RwaProjects::Description).text().not_null())
                    .col(
                        ColumnDef::new(RwaProjects::AssetType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RwaProjects::TotalValue).double().not_null())
                    .col(
                        ColumnDef::new(RwaProjects::TokenSymbol)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RwaProjects::TokenSupply)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RwaProjects::YieldPercentage)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RwaProjects::ContractAddress).text().null())
                    .col(ColumnDef::new(RwaProjects::WebsiteUrl).text().null())
                    .col(ColumnDef::new(RwaProjects::WhitepaperUrl).text().null())
                    .col(ColumnDef::new(RwaProjects::TeamInfo).text().not_null())
                    .col(ColumnDef::new(RwaProjects::Tokenomics).text().not_null())
                    .col(ColumnDef::new(RwaProjects::ComplianceInfo).text().not_null())
                    .col(
                        ColumnDef::new(RwaProjects::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(RwaProjects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing queries filter on asset type and sort newest-first
        manager
            .create_index(
                Index::create()
                    .name("idx_rwa_projects_asset_type")
                    .table(RwaProjects::Table)
                    .col(RwaProjects::AssetType)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rwa_projects_created_at")
                    .table(RwaProjects::Table)
                    .col(RwaProjects::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RwaProjects::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RwaProjects {
    Table,
    Id,
    Name,
    Description,
    AssetType,
    TotalValue,
    TokenSymbol,
    TokenSupply,
    YieldPercentage,
    ContractAddress,
    WebsiteUrl,
    WhitepaperUrl,
    TeamInfo,
    Tokenomics,
    ComplianceInfo,
    Status,
    CreatedAt,
}
