//! SeaORM Entity for risk alerts
//!
//! Notification feed derived from analysis outcomes. is_read is the only
//! mutable column.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "risk_alerts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub project_id: String,
    /// risk_increase, risk_decrease, yield_change or market_event
    pub alert_type: String,
    /// info, warning or critical
    pub severity: String,
    pub title: String,
    pub message: String,
    pub previous_value: Option<f64>,
    pub new_value: Option<f64>,
    pub is_read: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
