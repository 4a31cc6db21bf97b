//! Risk analysis engine
//!
//! Builds a structured prompt from a project record, calls an OpenAI-style
//! chat-completions endpoint asking for strict JSON, and normalizes the
//! response. The upstream is treated as untrusted: scores are clamped into
//! [0, 100], the risk level is validated against the known set, and any
//! transport or parse failure is absorbed into a deterministic fallback
//! result. `analyze` never fails and never retries; callers decide when to
//! re-invoke.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::entities::rwa_projects;
use crate::models::analysis::{
    AnalysisDraft, RISK_LEVELS, RISK_LEVEL_MEDIUM, RecommendationDraft, TOLERANCE_AGGRESSIVE,
    TOLERANCE_CONSERVATIVE, TOLERANCE_MODERATE,
};

/// ai_model sentinel marking a non-AI fallback result
pub const FALLBACK_MODEL: &str = "fallback";

/// Upstream request timeout; a timeout is handled like any other failure
const UPSTREAM_TIMEOUT_SECS: u64 = 60;

const MAX_COMPLETION_TOKENS: u32 = 2048;

#[derive(Clone)]
pub struct RiskAnalyzerService {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

// Shape the prompt instructs the model to return. Field names are camelCase
// because that is what the prompt documents.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpstreamResult {
    risk_analysis: UpstreamRiskAnalysis,
    investment_recommendations: UpstreamRecommendations,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpstreamRiskAnalysis {
    overall_score: f64,
    financial_health_score: f64,
    team_credibility_score: f64,
    market_viability_score: f64,
    regulatory_compliance_score: f64,
    technical_implementation_score: f64,
    risk_level: String,
    summary: String,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    weaknesses: Vec<String>,
    #[serde(default)]
    recommendations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct UpstreamRecommendations {
    conservative: UpstreamRecommendation,
    moderate: UpstreamRecommendation,
    aggressive: UpstreamRecommendation,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpstreamRecommendation {
    recommendation: String,
    suggested_allocation: f64,
    reasoning: String,
}

impl RiskAnalyzerService {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
            model,
        }
    }

    /// Analyze a project. Always returns a usable result: on any upstream
    /// failure the deterministic fallback is substituted and marked with the
    /// `FALLBACK_MODEL` sentinel.
    pub async fn analyze(
        &self,
        project: &rwa_projects::Model,
    ) -> (AnalysisDraft, Vec<RecommendationDraft>) {
        match self.request_analysis(project).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(
                    project_id = %project.id,
                    error = %e,
                    "risk analysis failed, returning fallback result"
                );
                fallback_result()
            }
        }
    }

    async fn request_analysis(
        &self,
        project: &rwa_projects::Model,
    ) -> Result<(AnalysisDraft, Vec<RecommendationDraft>), Box<dyn std::error::Error + Send + Sync>>
    {
        let prompt = build_prompt(project);

        let url = format!("{}/chat/completions", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "response_format": { "type": "json_object" },
            "max_completion_tokens": MAX_COMPLETION_TOKENS,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(format!("completion API error {}: {}", status, error_text).into());
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let content = completion
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or("no content in completion response")?;

        let result: UpstreamResult = serde_json::from_str(content)?;

        tracing::info!(
            project_id = %project.id,
            overall_score = result.risk_analysis.overall_score,
            risk_level = %result.risk_analysis.risk_level,
            "received risk analysis from model"
        );

        Ok(normalize_result(result, &self.model))
    }
}

/// Clamp an upstream score into [0, 100]; the model's range is not trusted
fn clamp_score(value: f64) -> i32 {
    value.clamp(0.0, 100.0).round() as i32
}

/// Accept only the four known risk levels; anything else becomes "medium"
fn normalize_risk_level(level: &str) -> String {
    let level = level.to_ascii_lowercase();
    if RISK_LEVELS.contains(&level.as_str()) {
        level
    } else {
        tracing::warn!(risk_level = %level, "unrecognized risk level from model, defaulting to medium");
        RISK_LEVEL_MEDIUM.to_string()
    }
}

fn normalize_result(
    result: UpstreamResult,
    model: &str,
) -> (AnalysisDraft, Vec<RecommendationDraft>) {
    let ra = result.risk_analysis;
    let analysis = AnalysisDraft {
        overall_score: clamp_score(ra.overall_score),
        financial_health_score: clamp_score(ra.financial_health_score),
        team_credibility_score: clamp_score(ra.team_credibility_score),
        market_viability_score: clamp_score(ra.market_viability_score),
        regulatory_compliance_score: clamp_score(ra.regulatory_compliance_score),
        technical_implementation_score: clamp_score(ra.technical_implementation_score),
        risk_level: normalize_risk_level(&ra.risk_level),
        summary: ra.summary,
        strengths: ra.strengths,
        weaknesses: ra.weaknesses,
        recommendations: ra.recommendations,
        ai_model: model.to_string(),
    };

    let recs = result.investment_recommendations;
    let recommendations = vec![
        recommendation_draft(TOLERANCE_CONSERVATIVE, recs.conservative),
        recommendation_draft(TOLERANCE_MODERATE, recs.moderate),
        recommendation_draft(TOLERANCE_AGGRESSIVE, recs.aggressive),
    ];

    (analysis, recommendations)
}

fn recommendation_draft(tolerance: &str, rec: UpstreamRecommendation) -> RecommendationDraft {
    RecommendationDraft {
        risk_tolerance: tolerance.to_string(),
        recommendation: rec.recommendation,
        suggested_allocation: rec.suggested_allocation,
        reasoning: rec.reasoning,
    }
}

/// Deterministic result used when the upstream call or parse fails
pub fn fallback_result() -> (AnalysisDraft, Vec<RecommendationDraft>) {
    let analysis = AnalysisDraft {
        overall_score: 50,
        financial_health_score: 50,
        team_credibility_score: 50,
        market_viability_score: 50,
        regulatory_compliance_score: 50,
        technical_implementation_score: 50,
        risk_level: RISK_LEVEL_MEDIUM.to_string(),
        summary: "Unable to complete full AI analysis. Please review project details manually \
                  and try again later."
            .to_string(),
        strengths: vec![
            "Project submitted for analysis".to_string(),
            "Basic information provided".to_string(),
        ],
        weaknesses: vec![
            "Full AI analysis could not be completed".to_string(),
            "Manual review recommended".to_string(),
        ],
        recommendations: vec![
            "Retry analysis when service is available".to_string(),
            "Consider providing more detailed documentation".to_string(),
        ],
        ai_model: FALLBACK_MODEL.to_string(),
    };

    let recommendations = vec![
        RecommendationDraft {
            risk_tolerance: TOLERANCE_CONSERVATIVE.to_string(),
            recommendation: "hold".to_string(),
            suggested_allocation: 0.0,
            reasoning: "Pending full analysis".to_string(),
        },
        RecommendationDraft {
            risk_tolerance: TOLERANCE_MODERATE.to_string(),
            recommendation: "hold".to_string(),
            suggested_allocation: 2.0,
            reasoning: "Pending full analysis".to_string(),
        },
        RecommendationDraft {
            risk_tolerance: TOLERANCE_AGGRESSIVE.to_string(),
            recommendation: "hold".to_string(),
            suggested_allocation: 5.0,
            reasoning: "Pending full analysis".to_string(),
        },
    ];

    (analysis, recommendations)
}

/// Structured prompt embedding every project field, with the requested JSON
/// shape and scoring guidelines spelled out.
fn build_prompt(project: &rwa_projects::Model) -> String {
    format!(
        r#"You are an expert RWA (Real World Asset) analyst specializing in tokenized assets. Analyze the following RWA project and provide a comprehensive risk assessment.

PROJECT DETAILS:
Name: {name}
Asset Type: {asset_type}
Description: {description}
Total Value: ${total_value}
Token Symbol: {token_symbol}
Token Supply: {token_supply}
Expected Yield: {yield_percentage}%
Contract Address: {contract_address}
Website: {website_url}
Whitepaper: {whitepaper_url}

TEAM INFORMATION:
{team_info}

TOKENOMICS:
{tokenomics}

COMPLIANCE INFORMATION:
{compliance_info}

Provide your analysis in the following JSON format:
{{
  "riskAnalysis": {{
    "overallScore": <number 0-100, higher is safer>,
    "financialHealthScore": <number 0-100>,
    "teamCredibilityScore": <number 0-100>,
    "marketViabilityScore": <number 0-100>,
    "regulatoryComplianceScore": <number 0-100>,
    "technicalImplementationScore": <number 0-100>,
    "riskLevel": "<low|medium|high|critical>",
    "summary": "<2-3 sentence summary of the overall assessment>",
    "strengths": ["<strength 1>", "<strength 2>", "<strength 3>"],
    "weaknesses": ["<weakness 1>", "<weakness 2>", "<weakness 3>"],
    "recommendations": ["<recommendation 1>", "<recommendation 2>", "<recommendation 3>"]
  }},
  "investmentRecommendations": {{
    "conservative": {{
      "recommendation": "<strong_buy|buy|hold|sell|strong_sell>",
      "suggestedAllocation": <percentage 0-20>,
      "reasoning": "<brief reasoning>"
    }},
    "moderate": {{
      "recommendation": "<strong_buy|buy|hold|sell|strong_sell>",
      "suggestedAllocation": <percentage 0-30>,
      "reasoning": "<brief reasoning>"
    }},
    "aggressive": {{
      "recommendation": "<strong_buy|buy|hold|sell|strong_sell>",
      "suggestedAllocation": <percentage 0-40>,
      "reasoning": "<brief reasoning>"
    }}
  }}
}}

Scoring Guidelines:
- 75-100: Low Risk (solid fundamentals, experienced team, strong compliance)
- 50-74: Medium Risk (some concerns but manageable)
- 25-49: High Risk (significant concerns, limited track record)
- 0-24: Critical Risk (major red flags, avoid)

Consider these factors:
1. Financial Health: Asset valuation, yield sustainability, liquidity
2. Team Credibility: Experience, track record, transparency
3. Market Viability: Market size, competition, growth potential
4. Regulatory Compliance: Licenses, KYC/AML, jurisdiction risks
5. Technical Implementation: Smart contract security, infrastructure

Respond ONLY with valid JSON."#,
        name = project.name,
        asset_type = project.asset_type,
        description = project.description,
        total_value = project.total_value,
        token_symbol = project.token_symbol,
        token_supply = project.token_supply,
        yield_percentage = project.yield_percentage,
        contract_address = project
            .contract_address
            .as_deref()
            .unwrap_or("Not deployed yet"),
        website_url = project.website_url.as_deref().unwrap_or("Not provided"),
        whitepaper_url = project.whitepaper_url.as_deref().unwrap_or("Not provided"),
        team_info = project.team_info,
        tokenomics = project.tokenomics,
        compliance_info = project.compliance_info,
    )
}
