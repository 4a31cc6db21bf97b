//! Postgres storage backend on SeaORM
//!
//! Selected at startup when DATABASE_URL is set; migrations run before the
//! first query. Asset-type and yield predicates are pushed into SQL; the
//! latest-analysis predicates are applied after the join.

use ::sea_orm::sea_query::{Expr, OnConflict};
use ::sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;

use crate::entities::prelude::{
    InvestmentRecommendations, MarketData, RiskAlerts, RiskAnalyses, RwaProjects,
};
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

pub struct SeaOrmStorage {
    db: DatabaseConnection,
}

impl SeaOrmStorage {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn join(&self, project: rwa_projects::Model) -> Result<ProjectWithAnalysis, DbErr> {
        let risk_analysis = RiskAnalyses::find()
            .filter(risk_analyses::Column::ProjectId.eq(&project.id))
            .order_by_desc(risk_analyses::Column::AnalyzedAt)
            .one(&self.db)
            .await?;

        let recommendations = InvestmentRecommendations::find()
            .filter(investment_recommendations::Column::ProjectId.eq(&project.id))
            .all(&self.db)
            .await?;

        Ok(ProjectWithAnalysis {
            project,
            risk_analysis,
            recommendations,
        })
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn now() -> DateTimeWithTimeZone {
    Utc::now().into()
}

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn list_projects(
        &self,
        filters: &ProjectFilters,
    ) -> Result<Vec<ProjectWithAnalysis>, DbErr> {
        let mut query = RwaProjects::find().order_by_desc(rwa_projects::Column::CreatedAt);

        if let Some(asset_type) = &filters.asset_type {
            query = query.filter(rwa_projects::Column::AssetType.eq(asset_type));
        }
        if let Some(min_yield) = filters.min_yield {
            query = query.filter(rwa_projects::Column::YieldPercentage.gte(min_yield));
        }
        if let Some(max_yield) = filters.max_yield {
            query = query.filter(rwa_projects::Column::YieldPercentage.lte(max_yield));
        }

        let projects = query.all(&self.db).await?;

        let mut rows = Vec::with_capacity(projects.len());
        for project in projects {
            let row = self.join(project).await?;
            if super::matches_analysis_filters(&row, filters) {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    async fn get_project(&self, id: &str) -> Result<Option<ProjectWithAnalysis>, DbErr> {
        match RwaProjects::find_by_id(id).one(&self.db).await? {
            Some(project) => Ok(Some(self.join(project).await?)),
            None => Ok(None),
        }
    }

    async fn get_project_row(&self, id: &str) -> Result<Option<rwa_projects::Model>, DbErr> {
        RwaProjects::find_by_id(id).one(&self.db).await
    }

    async fn create_project(
        &self,
        req: &CreateProjectRequest,
    ) -> Result<rwa_projects::Model, DbErr> {
        let project = rwa_projects::ActiveModel {
            id: Set(new_id()),
            name: Set(req.name.clone()),
            description: Set(req.description.clone()),
            asset_type: Set(req.asset_type.clone()),
            total_value: Set(req.total_value),
            token_symbol: Set(req.token_symbol.clone()),
            token_supply: Set(req.token_supply),
            yield_percentage: Set(req.yield_percentage),
            contract_address: Set(req.contract_address.clone()),
            website_url: Set(req.website_url.clone()),
            whitepaper_url: Set(req.whitepaper_url.clone()),
            team_info: Set(req.team_info.clone()),
            tokenomics: Set(req.tokenomics.clone()),
            compliance_info: Set(req.compliance_info.clone()),
            status: Set(STATUS_PENDING.to_string()),
            created_at: Set(now()),
        };
        project.insert(&self.db).await
    }

    async fn update_project(
        &self,
        id: &str,
        req: &UpdateProjectRequest,
    ) -> Result<Option<rwa_projects::Model>, DbErr> {
        let Some(existing) = RwaProjects::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut project = existing.into_active_model();
        if let Some(name) = &req.name {
            project.name = Set(name.clone());
        }
        if let Some(description) = &req.description {
            project.description = Set(description.clone());
        }
        if let Some(asset_type) = &req.asset_type {
            project.asset_type = Set(asset_type.clone());
        }
        if let Some(total_value) = req.total_value {
            project.total_value = Set(total_value);
        }
        if let Some(token_symbol) = &req.token_symbol {
            project.token_symbol = Set(token_symbol.clone());
        }
        if let Some(token_supply) = req.token_supply {
            project.token_supply = Set(token_supply);
        }
        if let Some(yield_percentage) = req.yield_percentage {
            project.yield_percentage = Set(yield_percentage);
        }
        if let Some(contract_address) = &req.contract_address {
            project.contract_address = Set(contract_address.clone());
        }
        if let Some(website_url) = &req.website_url {
            project.website_url = Set(website_url.clone());
        }
        if let Some(whitepaper_url) = &req.whitepaper_url {
            project.whitepaper_url = Set(whitepaper_url.clone());
        }
        if let Some(team_info) = &req.team_info {
            project.team_info = Set(team_info.clone());
        }
        if let Some(tokenomics) = &req.tokenomics {
            project.tokenomics = Set(tokenomics.clone());
        }
        if let Some(compliance_info) = &req.compliance_info {
            project.compliance_info = Set(compliance_info.clone());
        }

        Ok(Some(project.update(&self.db).await?))
    }

    async fn set_project_status(&self, id: &str, status: &str) -> Result<(), DbErr> {
        RwaProjects::update_many()
            .col_expr(rwa_projects::Column::Status, Expr::value(status))
            .filter(rwa_projects::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn create_risk_analysis(
        &self,
        project_id: &str,
        draft: &AnalysisDraft,
    ) -> Result<risk_analyses::Model, DbErr> {
        let analysis = risk_analyses::ActiveModel {
            id: Set(new_id()),
            project_id: Set(project_id.to_string()),
            overall_score: Set(draft.overall_score),
            financial_health_score: Set(draft.financial_health_score),
            team_credibility_score: Set(draft.team_credibility_score),
            market_viability_score: Set(draft.market_viability_score),
            regulatory_compliance_score: Set(draft.regulatory_compliance_score),
            technical_implementation_score: Set(draft.technical_implementation_score),
            risk_level: Set(draft.risk_level.clone()),
            summary: Set(draft.summary.clone()),
            strengths: Set(serde_json::json!(draft.strengths)),
            weaknesses: Set(serde_json::json!(draft.weaknesses)),
            recommendations: Set(serde_json::json!(draft.recommendations)),
            ai_model: Set(draft.ai_model.clone()),
            analyzed_at: Set(now()),
        };
        analysis.insert(&self.db).await
    }

    async fn create_recommendation(
        &self,
        project_id: &str,
        draft: &RecommendationDraft,
    ) -> Result<investment_recommendations::Model, DbErr> {
        let rec = investment_recommendations::ActiveModel {
            id: Set(new_id()),
            project_id: Set(project_id.to_string()),
            risk_tolerance: Set(draft.risk_tolerance.clone()),
            recommendation: Set(draft.recommendation.clone()),
            reasoning: Set(draft.reasoning.clone()),
            suggested_allocation: Set(draft.suggested_allocation),
            created_at: Set(now()),
        };
        rec.insert(&self.db).await
    }

    async fn list_recommendations(
        &self,
        project_id: Option<&str>,
    ) -> Result<Vec<investment_recommendations::Model>, DbErr> {
        let mut query = InvestmentRecommendations::find()
            .order_by_desc(investment_recommendations::Column::CreatedAt);
        if let Some(project_id) = project_id {
            query = query.filter(investment_recommendations::Column::ProjectId.eq(project_id));
        }
        query.all(&self.db).await
    }

    async fn create_alert(&self, draft: &AlertDraft) -> Result<risk_alerts::Model, DbErr> {
        let alert = risk_alerts::ActiveModel {
            id: Set(new_id()),
            project_id: Set(draft.project_id.clone()),
            alert_type: Set(draft.alert_type.clone()),
            severity: Set(draft.severity.clone()),
            title: Set(draft.title.clone()),
            message: Set(draft.message.clone()),
            previous_value: Set(draft.previous_value),
            new_value: Set(draft.new_value),
            is_read: Set(false),
            created_at: Set(now()),
        };
        alert.insert(&self.db).await
    }

    async fn list_alerts(
        &self,
        project_id: Option<&str>,
    ) -> Result<Vec<risk_alerts::Model>, DbErr> {
        let mut query = RiskAlerts::find().order_by_desc(risk_alerts::Column::CreatedAt);
        if let Some(project_id) = project_id {
            query = query.filter(risk_alerts::Column::ProjectId.eq(project_id));
        }
        query.all(&self.db).await
    }

    async fn mark_alert_read(&self, id: &str) -> Result<bool, DbErr> {
        let Some(alert) = RiskAlerts::find_by_id(id).one(&self.db).await? else {
            return Ok(false);
        };

        let mut alert = alert.into_active_model();
        alert.is_read = Set(true);
        alert.update(&self.db).await?;
        Ok(true)
    }

    async fn list_market_data(
        &self,
        asset_type: Option<&str>,
    ) -> Result<Vec<market_data::Model>, DbErr> {
        let mut query = MarketData::find();
        if let Some(asset_type) = asset_type {
            query = query.filter(market_data::Column::AssetType.eq(asset_type));
        }
        query.all(&self.db).await
    }

    async fn upsert_market_data(
        &self,
        data: &MarketDataUpsert,
    ) -> Result<market_data::Model, DbErr> {
        let row = market_data::ActiveModel {
            id: Set(new_id()),
            asset_type: Set(data.asset_type.clone()),
            symbol: Set(data.symbol.clone()),
            price: Set(data.price),
            price_change_24h: Set(data.price_change_24h),
            volume_24h: Set(data.volume_24h),
            market_cap: Set(data.market_cap),
            last_updated: Set(now()),
        };

        MarketData::insert(row)
            .on_conflict(
                OnConflict::columns([market_data::Column::AssetType, market_data::Column::Symbol])
                    .update_columns([
                        market_data::Column::Price,
                        market_data::Column::PriceChange24h,
                        market_data::Column::Volume24h,
                        market_data::Column::MarketCap,
                        market_data::Column::LastUpdated,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        MarketData::find()
            .filter(market_data::Column::AssetType.eq(&data.asset_type))
            .filter(market_data::Column::Symbol.eq(&data.symbol))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!(
                    "market data row missing after upsert: {} {}",
                    data.asset_type, data.symbol
                ))
            })
    }

    async fn stats(&self) -> Result<StatsResponse, DbErr> {
        let total_projects = RwaProjects::find().count(&self.db).await?;
        let total_analyses = RiskAnalyses::find().count(&self.db).await?;

        let total_value: Option<f64> = RwaProjects::find()
            .select_only()
            .column_as(rwa_projects::Column::TotalValue.sum(), "total_value")
            .into_tuple()
            .one(&self.db)
            .await?
            .flatten();

        Ok(StatsResponse {
            total_projects,
            total_value: total_value.unwrap_or(0.0),
            total_analyses,
        })
    }
}
