use serde::Serialize;

/// Risk levels in ascending severity
pub const RISK_LEVELS: [&str; 4] = [
    RISK_LEVEL_LOW,
    RISK_LEVEL_MEDIUM,
    RISK_LEVEL_HIGH,
    RISK_LEVEL_CRITICAL,
];

pub const RISK_LEVEL_LOW: &str = "low";
pub const RISK_LEVEL_MEDIUM: &str = "medium";
pub const RISK_LEVEL_HIGH: &str = "high";
pub const RISK_LEVEL_CRITICAL: &str = "critical";

pub const TOLERANCE_CONSERVATIVE: &str = "conservative";
pub const TOLERANCE_MODERATE: &str = "moderate";
pub const TOLERANCE_AGGRESSIVE: &str = "aggressive";

/// Analysis engine output before a project id and row identity are attached.
/// All scores are already clamped to [0, 100].
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisDraft {
    pub overall_score: i32,
    pub financial_health_score: i32,
    pub team_credibility_score: i32,
    pub market_viability_score: i32,
    pub regulatory_compliance_score: i32,
    pub technical_implementation_score: i32,
    pub risk_level: String,
    pub summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub ai_model: String,
}

/// One tolerance-banded recommendation before persistence
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationDraft {
    pub risk_tolerance: String,
    pub recommendation: String,
    pub suggested_allocation: f64,
    pub reasoning: String,
}
