use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RiskAnalyses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RiskAnalyses::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RiskAnalyses::ProjectId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RiskAnalyses::OverallScore)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RiskAnalyses::FinancialHealthScore)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RiskAnalyses::TeamCredibilityScore)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RiskAnalyses::MarketViabilityScore)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RiskAnalyses::RegulatoryComplianceScore)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RiskAnalyses::TechnicalImplementationScore)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RiskAnalyses::RiskLevel)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RiskAnalyses::Summary).text().not_null())
                    .col(
                        ColumnDef::new(RiskAnalyses::Strengths)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RiskAnalyses::Weaknesses)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RiskAnalyses::Recommendations)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RiskAnalyses::AiModel)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RiskAnalyses::AnalyzedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_risk_analyses_project")
                            .from(RiskAnalyses::Table, RiskAnalyses::ProjectId)
                            .to(RwaProjects::Table, RwaProjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Latest-analysis lookup is (project_id, analyzed_at desc)
        manager
            .create_index(
                Index::create()
                    .name("idx_risk_analyses_project_analyzed_at")
                    .table(RiskAnalyses::Table)
                    .col(RiskAnalyses::ProjectId)
                    .col(RiskAnalyses::AnalyzedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RiskAnalyses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RiskAnalyses {
    Table,
    Id,
    ProjectId,
    OverallScore,
    FinancialHealthScore,
    TeamCredibilityScore,
    MarketViabilityScore,
    RegulatoryComplianceScore,
    TechnicalImplementationScore,
    RiskLevel,
    Summary,
    Strengths,
    Weaknesses,
    Recommendations,
    AiModel,
    AnalyzedAt,
}

#[derive(Iden)]
enum RwaProjects {
    Table,
    Id,
}
