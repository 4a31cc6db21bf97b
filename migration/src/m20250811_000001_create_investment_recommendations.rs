use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InvestmentRecommendations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InvestmentRecommendations::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(InvestmentRecommendations::ProjectId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InvestmentRecommendations::RiskTolerance)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InvestmentRecommendations::Recommendation)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InvestmentRecommendations::Reasoning)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InvestmentRecommendations::SuggestedAllocation)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InvestmentRecommendations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_investment_recommendations_project")
                            .from(
                                InvestmentRecommendations::Table,
                                InvestmentRecommendations::ProjectId,
                            )
                            .to(RwaProjects::Table, RwaProjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_investment_recommendations_project")
                    .table(InvestmentRecommendations::Table)
                    .col(InvestmentRecommendations::ProjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(InvestmentRecommendations::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum InvestmentRecommendations {
    Table,
    Id,
    ProjectId,
    RiskTolerance,
    Recommendation,
    Reasoning,
    SuggestedAllocation,
    CreatedAt,
}

#[derive(Iden)]
enum RwaProjects {
    Table,
    Id,
}
