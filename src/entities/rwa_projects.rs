//! SeaORM Entity for RWA projects
//!
//! Core record for a tokenized real-world asset submitted for analysis.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rwa_projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: String,
    /// real_estate, bonds, invoices or commodities
    pub asset_type: String,
    /// Total asset value in USD
    pub total_value: f64,
    pub token_symbol: String,
    pub token_supply: i64,
    /// Expected annual yield, 0-100
    pub yield_percentage: f64,
    pub contract_address: Option<String>,
    pub website_url: Option<String>,
    pub whitepaper_url: Option<String>,
    pub team_info: String,
    pub tokenomics: String,
    pub compliance_info: String,
    /// Lifecycle: pending, analyzing, analyzed
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
