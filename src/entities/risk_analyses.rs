//! SeaORM Entity for risk analyses
//!
//! One row per analysis run. Rows are immutable; a re-analysis inserts a new
//! row and "current" means greatest analyzed_at.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "risk_analyses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub project_id: String,
    /// 0-100, higher is safer
    pub overall_score: i32,
    pub financial_health_score: i32,
    pub team_credibility_score: i32,
    pub market_viability_score: i32,
    pub regulatory_compliance_score: i32,
    pub technical_implementation_score: i32,
    /// low, medium, high or critical
    pub risk_level: String,
    pub summary: String,
    /// JSON array of strings
    #[sea_orm(column_type = "JsonBinary")]
    pub strengths: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub weaknesses: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub recommendations: Json,
    /// Producing model identifier; "fallback" marks a non-AI result
    pub ai_model: String,
    pub analyzed_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
