use serde::{Deserialize, Serialize};

pub const ALERT_RISK_INCREASE: &str = "risk_increase";
pub const ALERT_RISK_DECREASE: &str = "risk_decrease";

pub const SEVERITY_INFO: &str = "info";
pub const SEVERITY_WARNING: &str = "warning";
pub const SEVERITY_CRITICAL: &str = "critical";

/// Alert content before persistence; is_read starts false
#[derive(Debug, Clone)]
pub struct AlertDraft {
    pub project_id: String,
    pub alert_type: String,
    pub severity: String,
    pub title: String,
    pub message: String,
    pub previous_value: Option<f64>,
    pub new_value: Option<f64>,
}

/// Query parameters for GET /api/alerts and GET /api/recommendations
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectScopeQuery {
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkReadResponse {
    pub success: bool,
}
