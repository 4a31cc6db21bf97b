use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RiskAlerts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RiskAlerts::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RiskAlerts::ProjectId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RiskAlerts::AlertType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RiskAlerts::Severity)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RiskAlerts::Title).text().not_null())
                    .col(ColumnDef::new(RiskAlerts::Message).text().not_null())
                    .col(ColumnDef::new(RiskAlerts::PreviousValue).double().null())
                    .col(ColumnDef::new(RiskAlerts::NewValue).double().null())
                    .col(
                        ColumnDef::new(RiskAlerts::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RiskAlerts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_risk_alerts_project")
                            .from(RiskAlerts::Table, RiskAlerts::ProjectId)
                            .to(RwaProjects::Table, RwaProjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Alert feed is served newest-first, optionally scoped to a project
        manager
            .create_index(
                Index::create()
                    .name("idx_risk_alerts_project_created_at")
                    .table(RiskAlerts::Table)
                    .col(RiskAlerts::ProjectId)
                    .col(RiskAlerts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RiskAlerts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RiskAlerts {
    Table,
    Id,
    ProjectId,
    AlertType,
    Severity,
    Title,
    Message,
    PreviousValue,
    NewValue,
    IsRead,
    CreatedAt,
}

#[derive(Iden)]
enum RwaProjects {
    Table,
    Id,
}
