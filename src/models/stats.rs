use serde::Serialize;

/// Response for GET /api/stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub total_projects: u64,
    /// Sum of total_value across all projects, in USD
    pub total_value: f64,
    pub total_analyses: u64,
}
