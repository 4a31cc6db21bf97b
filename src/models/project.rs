use serde::{Deserialize, Serialize};

use crate::entities::{investment_recommendations, risk_analyses, rwa_projects};

/// Asset classes accepted for submission
pub const ASSET_TYPES: [&str; 4] = ["real_estate", "bonds", "invoices", "commodities"];

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_ANALYZING: &str = "analyzing";
pub const STATUS_ANALYZED: &str = "analyzed";

/// Payload for POST /api/projects (Project schema minus id/status/created_at)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: String,
    pub asset_type: String,
    pub total_value: f64,
    pub token_symbol: String,
    pub token_supply: i64,
    pub yield_percentage: f64,
    pub contract_address: Option<String>,
    pub website_url: Option<String>,
    pub whitepaper_url: Option<String>,
    pub team_info: String,
    pub tokenomics: String,
    pub compliance_info: String,
}

/// Payload for PATCH /api/projects/{id}; absent fields are left unchanged.
/// The nullable columns use a double Option so an explicit JSON null clears
/// them: absent -> None, null -> Some(None), value -> Some(Some(v)).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub asset_type: Option<String>,
    pub total_value: Option<f64>,
    pub token_symbol: Option<String>,
    pub token_supply: Option<i64>,
    pub yield_percentage: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub contract_address: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub website_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub whitepaper_url: Option<Option<String>>,
    pub team_info: Option<String>,
    pub tokenomics: Option<String>,
    pub compliance_info: Option<String>,
}

/// Wraps any present value (null included) in Some, so absence stays
/// distinguishable from an explicit null
fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Query parameters for GET /api/projects, ANDed together
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilters {
    pub asset_type: Option<String>,
    /// Matches the risk level of the latest analysis only
    pub risk_level: Option<String>,
    pub min_yield: Option<f64>,
    pub max_yield: Option<f64>,
    /// Projects without an analysis count as score 0
    pub min_score: Option<i32>,
    pub max_score: Option<i32>,
}

/// Project joined with its latest analysis and all recommendations
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithAnalysis {
    #[serde(flatten)]
    pub project: rwa_projects::Model,
    pub risk_analysis: Option<risk_analyses::Model>,
    pub recommendations: Vec<investment_recommendations::Model>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// 400 body: which fields failed and why
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub details: Vec<FieldError>,
}
