//! SeaORM Entity for investment recommendations
//!
//! Three rows per completed analysis run, one per risk-tolerance band.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "investment_recommendations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub project_id: String,
    /// conservative, moderate or aggressive
    pub risk_tolerance: String,
    /// strong_buy, buy, hold, sell or strong_sell
    pub recommendation: String,
    pub reasoning: String,
    /// Suggested portfolio allocation percentage
    pub suggested_allocation: f64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
