//! Analysis orchestration
//!
//! Drives the lifecycle around one analysis run:
//! analyzing -> analysis row -> three recommendation rows -> analyzed -> alert.
//! The engine itself never fails (it falls back internally), so errors here
//! are persistence errors; they are caught at the top and the project status
//! is reverted to "pending" so the project stays re-analyzable.
//!
//! Two alert triggers coexist:
//! - the background (creation) path always emits a completion alert, typed by
//!   the score-vs-60 threshold;
//! - the synchronous re-analyze path emits an alert only for high/critical
//!   risk levels.

use std::sync::Arc;

use sea_orm::DbErr;

use crate::entities::rwa_projects;
use crate::models::alert::{
    ALERT_RISK_DECREASE, ALERT_RISK_INCREASE, AlertDraft, SEVERITY_CRITICAL, SEVERITY_INFO,
    SEVERITY_WARNING,
};
use crate::models::analysis::{AnalysisDraft, RISK_LEVEL_CRITICAL, RISK_LEVEL_HIGH};
use crate::models::project::{STATUS_ANALYZED, STATUS_ANALYZING, STATUS_PENDING};
use crate::services::risk_analyzer::RiskAnalyzerService;
use crate::storage::Storage;

/// Background path: full run plus the unconditional completion alert.
/// Any error is logged and the project status reverted to pending.
pub async fn analyze_in_background(
    storage: &Arc<dyn Storage>,
    analyzer: &RiskAnalyzerService,
    project_id: &str,
) {
    let project = match storage.get_project_row(project_id).await {
        Ok(Some(project)) => project,
        Ok(None) => {
            tracing::warn!(project_id = %project_id, "project vanished before analysis");
            return;
        }
        Err(e) => {
            tracing::error!(project_id = %project_id, error = %e, "failed to load project for analysis");
            return;
        }
    };

    if let Err(e) = run_background(storage, analyzer, &project).await {
        tracing::error!(project_id = %project_id, error = %e, "background analysis failed");
        revert_to_pending(storage, project_id).await;
    }
}

async fn run_background(
    storage: &Arc<dyn Storage>,
    analyzer: &RiskAnalyzerService,
    project: &rwa_projects::Model,
) -> Result<(), DbErr> {
    let analysis = run_sequence(storage, analyzer, project).await?;
    storage.create_alert(&completion_alert(&project.id, &analysis)).await?;
    Ok(())
}

/// Synchronous re-analyze path; the caller returns the refreshed project.
/// On error the status is reverted before the error propagates.
pub async fn reanalyze_project(
    storage: &Arc<dyn Storage>,
    analyzer: &RiskAnalyzerService,
    project: &rwa_projects::Model,
) -> Result<(), DbErr> {
    match run_reanalyze(storage, analyzer, project).await {
        Ok(()) => Ok(()),
        Err(e) => {
            revert_to_pending(storage, &project.id).await;
            Err(e)
        }
    }
}

async fn run_reanalyze(
    storage: &Arc<dyn Storage>,
    analyzer: &RiskAnalyzerService,
    project: &rwa_projects::Model,
) -> Result<(), DbErr> {
    let analysis = run_sequence(storage, analyzer, project).await?;
    if let Some(alert) = escalation_alert(&project.id, &analysis) {
        storage.create_alert(&alert).await?;
    }
    Ok(())
}

/// Shared run sequence, alert derivation excluded
async fn run_sequence(
    storage: &Arc<dyn Storage>,
    analyzer: &RiskAnalyzerService,
    project: &rwa_projects::Model,
) -> Result<AnalysisDraft, DbErr> {
    storage
        .set_project_status(&project.id, STATUS_ANALYZING)
        .await?;

    let (analysis, recommendations) = analyzer.analyze(project).await;

    storage.create_risk_analysis(&project.id, &analysis).await?;
    for recommendation in &recommendations {
        storage
            .create_recommendation(&project.id, recommendation)
            .await?;
    }

    storage
        .set_project_status(&project.id, STATUS_ANALYZED)
        .await?;

    tracing::info!(
        project_id = %project.id,
        overall_score = analysis.overall_score,
        risk_level = %analysis.risk_level,
        ai_model = %analysis.ai_model,
        "analysis run persisted"
    );

    Ok(analysis)
}

async fn revert_to_pending(storage: &Arc<dyn Storage>, project_id: &str) {
    if let Err(e) = storage.set_project_status(project_id, STATUS_PENDING).await {
        tracing::error!(project_id = %project_id, error = %e, "failed to revert project status to pending");
    }
}

/// Completion alert for the background path. The type is a single-run
/// threshold on the score, not a delta against a prior analysis;
/// previous_value is always None here.
fn completion_alert(project_id: &str, analysis: &AnalysisDraft) -> AlertDraft {
    let alert_type = if analysis.overall_score >= 60 {
        ALERT_RISK_DECREASE
    } else {
        ALERT_RISK_INCREASE
    };

    let severity = match analysis.risk_level.as_str() {
        RISK_LEVEL_CRITICAL => SEVERITY_CRITICAL,
        RISK_LEVEL_HIGH => SEVERITY_WARNING,
        _ => SEVERITY_INFO,
    };

    AlertDraft {
        project_id: project_id.to_string(),
        alert_type: alert_type.to_string(),
        severity: severity.to_string(),
        title: "Analysis Complete".to_string(),
        message: format!(
            "Risk analysis completed with score {}/100. {} risk level detected.",
            analysis.overall_score, analysis.risk_level
        ),
        previous_value: None,
        new_value: Some(analysis.overall_score as f64),
    }
}

/// Re-analyze path alert: only high/critical results produce one
fn escalation_alert(project_id: &str, analysis: &AnalysisDraft) -> Option<AlertDraft> {
    let (severity, title) = match analysis.risk_level.as_str() {
        RISK_LEVEL_CRITICAL => (SEVERITY_CRITICAL, "Critical Risk Identified"),
        RISK_LEVEL_HIGH => (SEVERITY_WARNING, "High Risk Identified"),
        _ => return None,
    };

    Some(AlertDraft {
        project_id: project_id.to_string(),
        alert_type: ALERT_RISK_INCREASE.to_string(),
        severity: severity.to_string(),
        title: title.to_string(),
        message: format!(
            "Analysis complete. Overall score: {}/100. {}",
            analysis.overall_score, analysis.summary
        ),
        previous_value: None,
        new_value: Some(analysis.overall_score as f64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::CreateProjectRequest;
    use crate::storage::MemStorage;

    fn draft(overall_score: i32, risk_level: &str) -> AnalysisDraft {
        AnalysisDraft {
            overall_score,
            financial_health_score: overall_score,
            team_credibility_score: overall_score,
            market_viability_score: overall_score,
            regulatory_compliance_score: overall_score,
            technical_implementation_score: overall_score,
            risk_level: risk_level.to_string(),
            summary: "summary".to_string(),
            strengths: vec![],
            weaknesses: vec![],
            recommendations: vec![],
            ai_model: "gpt-5".to_string(),
        }
    }

    fn create_request() -> CreateProjectRequest {
        CreateProjectRequest {
            name: "Test Project".to_string(),
            description: "desc".to_string(),
            asset_type: "bonds".to_string(),
            total_value: 1_000_000.0,
            token_symbol: "TST".to_string(),
            token_supply: 1_000_000,
            yield_percentage: 5.0,
            contract_address: None,
            website_url: None,
            whitepaper_url: None,
            team_info: "team".to_string(),
            tokenomics: "tokenomics".to_string(),
            compliance_info: "compliance".to_string(),
        }
    }

    /// Analyzer pointed at a closed port so every call takes the fallback path
    fn unreachable_analyzer() -> RiskAnalyzerService {
        RiskAnalyzerService::new(
            "test-key".to_string(),
            "http://127.0.0.1:9".to_string(),
            "gpt-5".to_string(),
        )
    }

    #[test]
    fn completion_alert_type_follows_score_threshold() {
        let high_score = completion_alert("p1", &draft(82, "low"));
        assert_eq!(high_score.alert_type, "risk_decrease");
        assert_eq!(high_score.severity, "info");
        assert_eq!(high_score.title, "Analysis Complete");
        assert_eq!(high_score.previous_value, None);
        assert_eq!(high_score.new_value, Some(82.0));

        let threshold = completion_alert("p1", &draft(60, "medium"));
        assert_eq!(threshold.alert_type, "risk_decrease");

        let low_score = completion_alert("p1", &draft(59, "high"));
        assert_eq!(low_score.alert_type, "risk_increase");
        assert_eq!(low_score.severity, "warning");
    }

    #[test]
    fn completion_alert_severity_follows_risk_level() {
        assert_eq!(completion_alert("p1", &draft(10, "critical")).severity, "critical");
        assert_eq!(completion_alert("p1", &draft(40, "high")).severity, "warning");
        assert_eq!(completion_alert("p1", &draft(55, "medium")).severity, "info");
        assert_eq!(completion_alert("p1", &draft(90, "low")).severity, "info");
    }

    #[test]
    fn escalation_alert_only_fires_for_high_and_critical() {
        assert!(escalation_alert("p1", &draft(80, "low")).is_none());
        assert!(escalation_alert("p1", &draft(55, "medium")).is_none());

        let high = escalation_alert("p1", &draft(40, "high")).unwrap();
        assert_eq!(high.severity, "warning");
        assert_eq!(high.title, "High Risk Identified");

        let critical = escalation_alert("p1", &draft(10, "critical")).unwrap();
        assert_eq!(critical.severity, "critical");
        assert_eq!(critical.title, "Critical Risk Identified");
    }

    #[tokio::test]
    async fn background_run_with_upstream_failure_persists_fallback() {
        let storage: Arc<dyn Storage> = Arc::new(MemStorage::new());
        let analyzer = unreachable_analyzer();

        let project = storage.create_project(&create_request()).await.unwrap();
        analyze_in_background(&storage, &analyzer, &project.id).await;

        let row = storage.get_project(&project.id).await.unwrap().unwrap();
        assert_eq!(row.project.status, "analyzed");

        let analysis = row.risk_analysis.expect("analysis row persisted");
        assert_eq!(analysis.overall_score, 50);
        assert_eq!(analysis.risk_level, "medium");
        assert_eq!(analysis.ai_model, "fallback");

        assert_eq!(row.recommendations.len(), 3);
        let mut bands: Vec<&str> = row
            .recommendations
            .iter()
            .map(|r| r.risk_tolerance.as_str())
            .collect();
        bands.sort();
        assert_eq!(bands, vec!["aggressive", "conservative", "moderate"]);

        // Fallback scores 50 < 60, so the completion alert reports an increase
        let alerts = storage.list_alerts(Some(&project.id)).await.unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, "risk_increase");
        assert_eq!(alerts[0].severity, "info");
        assert!(!alerts[0].is_read);
    }

    #[tokio::test]
    async fn reanalyze_with_fallback_emits_no_escalation_alert() {
        let storage: Arc<dyn Storage> = Arc::new(MemStorage::new());
        let analyzer = unreachable_analyzer();

        let project = storage.create_project(&create_request()).await.unwrap();
        reanalyze_project(&storage, &analyzer, &project).await.unwrap();

        let row = storage.get_project(&project.id).await.unwrap().unwrap();
        assert_eq!(row.project.status, "analyzed");
        assert_eq!(row.risk_analysis.unwrap().ai_model, "fallback");

        // Medium risk level does not trip the escalation alert path
        let alerts = storage.list_alerts(Some(&project.id)).await.unwrap();
        assert!(alerts.is_empty());
    }

    #[tokio::test]
    async fn repeated_runs_keep_every_analysis_row() {
        let storage: Arc<dyn Storage> = Arc::new(MemStorage::new());
        let analyzer = unreachable_analyzer();

        let project = storage.create_project(&create_request()).await.unwrap();
        reanalyze_project(&storage, &analyzer, &project).await.unwrap();
        reanalyze_project(&storage, &analyzer, &project).await.unwrap();

        // Re-analysis inserts rather than mutates; recommendations accumulate
        let row = storage.get_project(&project.id).await.unwrap().unwrap();
        assert_eq!(row.recommendations.len(), 6);
        assert!(row.risk_analysis.is_some());
    }
}
