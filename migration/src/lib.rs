pub use sea_orm_migration::prelude::*;

mod m20250810_000001_create_rwa_projects;
mod m20250810_000002_create_risk_analyses;
mod m20250811_000001_create_investment_recommendations;
mod m20250811_000002_create_risk_alerts;
mod m20250812_000001_create_market_data;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250810_000001_create_rwa_projects::Migration),
            Box::new(m20250810_000002_create_risk_analyses::Migration),
            Box::new(m20250811_000001_create_investment_recommendations::Migration),
            Box::new(m20250811_000002_create_risk_alerts::Migration),
            Box::new(m20250812_000001_create_market_data::Migration),
        ]
    }
}
