//! Storage abstraction for the RWA platform
//!
//! Handlers and services talk to the `Storage` trait only, so the in-memory
//! backend and the Postgres backend are interchangeable. The binary picks one
//! at startup based on whether DATABASE_URL is configured.

pub mod mem;
pub mod sea_orm;

use async_trait::async_trait;
use ::sea_orm::DbErr;

use crate::entities::{investment_recommendations, market_data, risk_alerts, risk_analyses, rwa_projects};
use crate::models::alert::AlertDraft;
use crate::models::analysis::{AnalysisDraft, RecommendationDraft};
use crate::models::market::MarketDataUpsert;
use crate::models::project::{
    CreateProjectRequest, ProjectFilters, ProjectWithAnalysis, UpdateProjectRequest,
};
use crate::models::stats::StatsResponse;

pub use mem::MemStorage;
pub use sea_orm::SeaOrmStorage;

/// Predicates that need the latest-analysis join: risk level and score range.
/// A project with no analysis never matches a risk-level filter and counts as
/// score 0 for the range checks.
pub(crate) fn matches_analysis_filters(row: &ProjectWithAnalysis, filters: &ProjectFilters) -> bool {
    if let Some(risk_level) = &filters.risk_level {
        match &row.risk_analysis {
            Some(analysis) if &analysis.risk_level == risk_level => {}
            _ => return false,
        }
    }

    let score = row.risk_analysis.as_ref().map_or(0, |a| a.overall_score);
    if let Some(min_score) = filters.min_score {
        if score < min_score {
            return false;
        }
    }
    if let Some(max_score) = filters.max_score {
        if score > max_score {
            return false;
        }
    }

    true
}

#[async_trait]
pub trait Storage: Send + Sync {
    /// Projects joined with latest analysis and recommendations, filtered and
    /// ordered newest-created first.
    async fn list_projects(&self, filters: &ProjectFilters)
        -> Result<Vec<ProjectWithAnalysis>, DbErr>;

    async fn get_project(&self, id: &str) -> Result<Option<ProjectWithAnalysis>, DbErr>;

    /// Bare project row, without the analysis join
    async fn get_project_row(&self, id: &str) -> Result<Option<rwa_projects::Model>, DbErr>;

    /// Insert with status "pending" and a fresh id
    async fn create_project(&self, req: &CreateProjectRequest)
        -> Result<rwa_projects::Model, DbErr>;

    async fn update_project(
        &self,
        id: &str,
        req: &UpdateProjectRequest,
    ) -> Result<Option<rwa_projects::Model>, DbErr>;

    async fn set_project_status(&self, id: &str, status: &str) -> Result<(), DbErr>;

    async fn create_risk_analysis(
        &self,
        project_id: &str,
        draft: &AnalysisDraft,
    ) -> Result<risk_analyses::Model, DbErr>;

    async fn create_recommendation(
        &self,
        project_id: &str,
        draft: &RecommendationDraft,
    ) -> Result<investment_recommendations::Model, DbErr>;

    async fn list_recommendations(
        &self,
        project_id: Option<&str>,
    ) -> Result<Vec<investment_recommendations::Model>, DbErr>;

    async fn create_alert(&self, draft: &AlertDraft) -> Result<risk_alerts::Model, DbErr>;

    /// Newest first
    async fn list_alerts(&self, project_id: Option<&str>)
        -> Result<Vec<risk_alerts::Model>, DbErr>;

    /// Returns false when the alert does not exist. Marking an already-read
    /// alert again succeeds.
    async fn mark_alert_read(&self, id: &str) -> Result<bool, DbErr>;

    async fn list_market_data(
        &self,
        asset_type: Option<&str>,
    ) -> Result<Vec<market_data::Model>, DbErr>;

    /// Insert or update by (asset_type, symbol), refreshing last_updated
    async fn upsert_market_data(&self, data: &MarketDataUpsert)
        -> Result<market_data::Model, DbErr>;

    async fn stats(&self) -> Result<StatsResponse, DbErr>;
}
