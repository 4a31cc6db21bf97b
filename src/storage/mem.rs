//! In-memory storage backend
//!
//! HashMap tables behind parking_lot locks. Used by the test suites and when
//! the server runs without DATABASE_URL. Lock scopes never cross an await.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;
use sea_orm::DbErr;
use sea_orm::prelude::DateTimeWithTimeZone;

use crate::entities::{
    investment_recommendations, market_data, risk_alerts, risk_analyses, rwa_projects,
};
use crate::models::alert::AlertDraft;
use crate::models::analysis::{AnalysisDraft, RecommendationDraft};
use crate::models::market::MarketDataUpsert;
use crate::models::project::{
    CreateProjectRequest, ProjectFilters, ProjectWithAnalysis, STATUS_PENDING,
    UpdateProjectRequest,
};
use crate::models::stats::StatsResponse;
use crate::storage::Storage;

use async_trait::async_trait;

#[derive(Default)]
pub struct MemStorage {
    projects: RwLock<HashMap<String, rwa_projects::Model>>,
    analyses: RwLock<HashMap<String, risk_analyses::Model>>,
    recommendations: RwLock<HashMap<String, investment_recommendations::Model>>,
    alerts: RwLock<HashMap<String, risk_alerts::Model>>,
    market_data: RwLock<HashMap<String, market_data::Model>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn latest_analysis(&self, project_id: &str) -> Option<risk_analyses::Model> {
        self.analyses
            .read()
            .values()
            .filter(|a| a.project_id == project_id)
            .max_by_key(|a| a.analyzed_at)
            .cloned()
    }

    fn recommendations_for(&self, project_id: &str) -> Vec<investment_recommendations::Model> {
        self.recommendations
            .read()
            .values()
            .filter(|r| r.project_id == project_id)
            .cloned()
            .collect()
    }

    fn join(&self, project: rwa_projects::Model) -> ProjectWithAnalysis {
        let risk_analysis = self.latest_analysis(&project.id);
        let recommendations = self.recommendations_for(&project.id);
        ProjectWithAnalysis {
            project,
            risk_analysis,
            recommendations,
        }
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn now() -> DateTimeWithTimeZone {
    Utc::now().into()
}

#[async_trait]
impl Storage for MemStorage {
    async fn list_projects(
        &self,
        filters: &ProjectFilters,
    ) -> Result<Vec<ProjectWithAnalysis>, DbErr> {
        let mut projects: Vec<rwa_projects::Model> =
            self.projects.read().values().cloned().collect();

        // Newest created first is the baseline ordering
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        if let Some(asset_type) = &filters.asset_type {
            projects.retain(|p| &p.asset_type == asset_type);
        }
        if let Some(min_yield) = filters.min_yield {
            projects.retain(|p| p.yield_percentage >= min_yield);
        }
        if let Some(max_yield) = filters.max_yield {
            projects.retain(|p| p.yield_percentage <= max_yield);
        }

        let joined = projects.into_iter().map(|p| self.join(p));
        Ok(joined
            .filter(|row| super::matches_analysis_filters(row, filters))
            .collect())
    }

    async fn get_project(&self, id: &str) -> Result<Option<ProjectWithAnalysis>, DbErr> {
        let project = self.projects.read().get(id).cloned();
        Ok(project.map(|p| self.join(p)))
    }

    async fn get_project_row(&self, id: &str) -> Result<Option<rwa_projects::Model>, DbErr> {
        Ok(self.projects.read().get(id).cloned())
    }

    async fn create_project(
        &self,
        req: &CreateProjectRequest,
    ) -> Result<rwa_projects::Model, DbErr> {
        let project = rwa_projects::Model {
            id: new_id(),
            name: req.name.clone(),
            description: req.description.clone(),
            asset_type: req.asset_type.clone(),
            total_value: req.total_value,
            token_symbol: req.token_symbol.clone(),
            token_supply: req.token_supply,
            yield_percentage: req.yield_percentage,
            contract_address: req.contract_address.clone(),
            website_url: req.website_url.clone(),
            whitepaper_url: req.whitepaper_url.clone(),
            team_info: req.team_info.clone(),
            tokenomics: req.tokenomics.clone(),
            compliance_info: req.compliance_info.clone(),
            status: STATUS_PENDING.to_string(),
            created_at: now(),
        };
        self.projects
            .write()
            .insert(project.id.clone(), project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        id: &str,
        req: &UpdateProjectRequest,
    ) -> Result<Option<rwa_projects::Model>, DbErr> {
        let mut projects = self.projects.write();
        let Some(project) = projects.get_mut(id) else {
            return Ok(None);
        };

        if let Some(name) = &req.name {
            project.name = name.clone();
        }
        if let Some(description) = &req.description {
            project.description = description.clone();
        }
        if let Some(asset_type) = &req.asset_type {
            project.asset_type = asset_type.clone();
        }
        if let Some(total_value) = req.total_value {
            project.total_value = total_value;
        }
        if let Some(token_symbol) = &req.token_symbol {
            project.token_symbol = token_symbol.clone();
        }
        if let Some(token_supply) = req.token_supply {
            project.token_supply = token_supply;
        }
        if let Some(yield_percentage) = req.yield_percentage {
            project.yield_percentage = yield_percentage;
        }
        if let Some(contract_address) = &req.contract_address {
            project.contract_address = contract_address.clone();
        }
        if let Some(website_url) = &req.website_url {
            project.website_url = website_url.clone();
        }
        if let Some(whitepaper_url) = &req.whitepaper_url {
            project.whitepaper_url = whitepaper_url.clone();
        }
        if let Some(team_info) = &req.team_info {
            project.team_info = team_info.clone();
        }
        if let Some(tokenomics) = &req.tokenomics {
            project.tokenomics = tokenomics.clone();
        }
        if let Some(compliance_info) = &req.compliance_info {
            project.compliance_info = compliance_info.clone();
        }

        Ok(Some(project.clone()))
    }

    async fn set_project_status(&self, id: &str, status: &str) -> Result<(), DbErr> {
        if let Some(project) = self.projects.write().get_mut(id) {
            project.status = status.to_string();
        }
        Ok(())
    }

    async fn create_risk_analysis(
        &self,
        project_id: &str,
        draft: &AnalysisDraft,
    ) -> Result<risk_analyses::Model, DbErr> {
        let analysis = risk_analyses::Model {
            id: new_id(),
            project_id: project_id.to_string(),
            overall_score: draft.overall_score,
            financial_health_score: draft.financial_health_score,
            team_credibility_score: draft.team_credibility_score,
            market_viability_score: draft.market_viability_score,
            regulatory_compliance_score: draft.regulatory_compliance_score,
            technical_implementation_score: draft.technical_implementation_score,
            risk_level: draft.risk_level.clone(),
            summary: draft.summary.clone(),
            strengths: serde_json::json!(draft.strengths),
            weaknesses: serde_json::json!(draft.weaknesses),
            recommendations: serde_json::json!(draft.recommendations),
            ai_model: draft.ai_model.clone(),
            analyzed_at: now(),
        };
        self.analyses
            .write()
            .insert(analysis.id.clone(), analysis.clone());
        Ok(analysis)
    }

    async fn create_recommendation(
        &self,
        project_id: &str,
        draft: &RecommendationDraft,
    ) -> Result<investment_recommendations::Model, DbErr> {
        let rec = investment_recommendations::Model {
            id: new_id(),
            project_id: project_id.to_string(),
            risk_tolerance: draft.risk_tolerance.clone(),
            recommendation: draft.recommendation.clone(),
            reasoning: draft.reasoning.clone(),
            suggested_allocation: draft.suggested_allocation,
            created_at: now(),
        };
        self.recommendations
            .write()
            .insert(rec.id.clone(), rec.clone());
        Ok(rec)
    }

    async fn list_recommendations(
        &self,
        project_id: Option<&str>,
    ) -> Result<Vec<investment_recommendations::Model>, DbErr> {
        let mut recs: Vec<investment_recommendations::Model> = self
            .recommendations
            .read()
            .values()
            .filter(|r| project_id.is_none_or(|id| r.project_id == id))
            .cloned()
            .collect();
        recs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(recs)
    }

    async fn create_alert(&self, draft: &AlertDraft) -> Result<risk_alerts::Model, DbErr> {
        let alert = risk_alerts::Model {
            id: new_id(),
            project_id: draft.project_id.clone(),
            alert_type: draft.alert_type.clone(),
            severity: draft.severity.clone(),
            title: draft.title.clone(),
            message: draft.message.clone(),
            previous_value: draft.previous_value,
            new_value: draft.new_value,
            is_read: false,
            created_at: now(),
        };
        self.alerts.write().insert(alert.id.clone(), alert.clone());
        Ok(alert)
    }

    async fn list_alerts(
        &self,
        project_id: Option<&str>,
    ) -> Result<Vec<risk_alerts::Model>, DbErr> {
        let mut alerts: Vec<risk_alerts::Model> = self
            .alerts
            .read()
            .values()
            .filter(|a| project_id.is_none_or(|id| a.project_id == id))
            .cloned()
            .collect();
        alerts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(alerts)
    }

    async fn mark_alert_read(&self, id: &str) -> Result<bool, DbErr> {
        match self.alerts.write().get_mut(id) {
            Some(alert) => {
                alert.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_market_data(
        &self,
        asset_type: Option<&str>,
    ) -> Result<Vec<market_data::Model>, DbErr> {
        Ok(self
            .market_data
            .read()
            .values()
            .filter(|d| asset_type.is_none_or(|t| d.asset_type == t))
            .cloned()
            .collect())
    }

    async fn upsert_market_data(
        &self,
        data: &MarketDataUpsert,
    ) -> Result<market_data::Model, DbErr> {
        let mut table = self.market_data.write();

        let existing_id = table
            .values()
            .find(|d| d.asset_type == data.asset_type && d.symbol == data.symbol)
            .map(|d| d.id.clone());

        let id = existing_id.unwrap_or_else(new_id);
        let row = market_data::Model {
            id: id.clone(),
            asset_type: data.asset_type.clone(),
            symbol: data.symbol.clone(),
            price: data.price,
            price_change_24h: data.price_change_24h,
            volume_24h: data.volume_24h,
            market_cap: data.market_cap,
            last_updated: now(),
        };
        table.insert(id, row.clone());
        Ok(row)
    }

    async fn stats(&self) -> Result<StatsResponse, DbErr> {
        let total_projects = self.projects.read().len() as u64;
        let total_value = self.projects.read().values().map(|p| p.total_value).sum();
        let total_analyses = self.analyses.read().len() as u64;
        Ok(StatsResponse {
            total_projects,
            total_value,
            total_analyses,
        })
    }
}
