#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    http::{Request, StatusCode, header},
    routing::post,
};
use serde_json::{Value, json};
use tower::ServiceExt;

use async_trait::async_trait;
use sea_orm::DbErr;

use rwalens_backend::AppState;
use rwalens_backend::entities::{
    investment_recommendations, market_data, risk_alerts, risk_analyses, rwa_projects,
};
use rwalens_backend::jobs::analysis_worker::start_analysis_worker;
use rwalens_backend::models::alert::AlertDraft;
use rwalens_backend::models::analysis::{AnalysisDraft, RecommendationDraft};
use rwalens_backend::models::market::MarketDataUpsert;
use rwalens_backend::models::project::{
    CreateProjectRequest, ProjectFilters, ProjectWithAnalysis, UpdateProjectRequest,
};
use rwalens_backend::models::stats::StatsResponse;
use rwalens_backend::services::risk_analyzer::RiskAnalyzerService;
use rwalens_backend::storage::{MemStorage, Storage};

/// Upstream endpoint that refuses connections immediately, so analysis runs
/// fall back to the deterministic result without waiting on a timeout.
pub const DEAD_UPSTREAM: &str = "http://127.0.0.1:9";

/// In-memory AppState wired to the given chat-completions base URL
pub fn test_state(base_url: &str) -> AppState {
    test_state_with_storage(Arc::new(MemStorage::new()), base_url)
}

pub fn test_state_with_storage(storage: Arc<dyn Storage>, base_url: &str) -> AppState {
    let analyzer = RiskAnalyzerService::new(
        "test-key".to_string(),
        base_url.to_string(),
        "gpt-5".to_string(),
    );
    let analysis_queue = start_analysis_worker(storage.clone(), analyzer.clone());

    AppState {
        storage,
        analyzer,
        analysis_queue,
    }
}

/// In-memory backend whose analysis inserts fail, for exercising the
/// persistence-error paths. Everything else delegates.
#[derive(Default)]
pub struct FailingAnalysisStorage {
    inner: MemStorage,
}

impl FailingAnalysisStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for FailingAnalysisStorage {
    async fn list_projects(
        &self,
        filters: &ProjectFilters,
    ) -> Result<Vec<ProjectWithAnalysis>, DbErr> {
        self.inner.list_projects(filters).await
    }

    async fn get_project(&self, id: &str) -> Result<Option<ProjectWithAnalysis>, DbErr> {
        self.inner.get_project(id).await
    }

    async fn get_project_row(&self, id: &str) -> Result<Option<rwa_projects::Model>, DbErr> {
        self.inner.get_project_row(id).await
    }

    async fn create_project(
        &self,
        req: &CreateProjectRequest,
    ) -> Result<rwa_projects::Model, DbErr> {
        self.inner.create_project(req).await
    }

    async fn update_project(
        &self,
        id: &str,
        req: &UpdateProjectRequest,
    ) -> Result<Option<rwa_projects::Model>, DbErr> {
        self.inner.update_project(id, req).await
    }

    async fn set_project_status(&self, id: &str, status: &str) -> Result<(), DbErr> {
        self.inner.set_project_status(id, status).await
    }

    async fn create_risk_analysis(
        &self,
        _project_id: &str,
        _draft: &AnalysisDraft,
    ) -> Result<risk_analyses::Model, DbErr> {
        Err(DbErr::Custom("analysis table unavailable".to_string()))
    }

    async fn create_recommendation(
        &self,
        project_id: &str,
        draft: &RecommendationDraft,
    ) -> Result<investment_recommendations::Model, DbErr> {
        self.inner.create_recommendation(project_id, draft).await
    }

    async fn list_recommendations(
        &self,
        project_id: Option<&str>,
    ) -> Result<Vec<investment_recommendations::Model>, DbErr> {
        self.inner.list_recommendations(project_id).await
    }

    async fn create_alert(&self, draft: &AlertDraft) -> Result<risk_alerts::Model, DbErr> {
        self.inner.create_alert(draft).await
    }

    async fn list_alerts(
        &self,
        project_id: Option<&str>,
    ) -> Result<Vec<risk_alerts::Model>, DbErr> {
        self.inner.list_alerts(project_id).await
    }

    async fn mark_alert_read(&self, id: &str) -> Result<bool, DbErr> {
        self.inner.mark_alert_read(id).await
    }

    async fn list_market_data(
        &self,
        asset_type: Option<&str>,
    ) -> Result<Vec<market_data::Model>, DbErr> {
        self.inner.list_market_data(asset_type).await
    }

    async fn upsert_market_data(
        &self,
        data: &MarketDataUpsert,
    ) -> Result<market_data::Model, DbErr> {
        self.inner.upsert_market_data(data).await
    }

    async fn stats(&self) -> Result<StatsResponse, DbErr> {
        self.inner.stats().await
    }
}

pub fn test_app(state: AppState) -> Router {
    rwalens_backend::build_router(state)
}

/// Serve a stub chat-completions endpoint on an ephemeral port, returning the
/// given payload as the (stringified) message content. Returns the base URL.
pub async fn spawn_completion_stub(analysis_payload: Value) -> String {
    let content =
        serde_json::to_string(&analysis_payload).expect("stub payload should serialize");
    let body = json!({
        "choices": [
            { "message": { "content": content } }
        ]
    });

    let app = Router::new().route(
        "/chat/completions",
        post(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub listener should bind");
    let addr = listener.local_addr().expect("stub listener has an address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });

    format!("http://{addr}")
}

/// Drive one request through the router and parse the JSON response body.
/// Returns Value::Null for empty bodies.
pub async fn request_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            builder
                .body(Body::from(value.to_string()))
                .expect("request should build")
        }
        None => builder.body(Body::empty()).expect("request should build"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router should produce a response");
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

/// A valid POST /api/projects payload
pub fn sample_project_payload() -> Value {
    json!({
        "name": "Harbor Point Offices",
        "description": "Tokenized commercial real estate in downtown Lisbon",
        "asset_type": "real_estate",
        "total_value": 12_500_000.0,
        "token_symbol": "HARBOR",
        "token_supply": 1_000_000,
        "yield_percentage": 7.2,
        "contract_address": "0x1234abcd",
        "website_url": "https://harborpoint.example",
        "whitepaper_url": null,
        "team_info": "Team of real estate veterans with 20 years of experience",
        "tokenomics": "1M tokens backed 1:1 by property equity",
        "compliance_info": "SEC Reg D 506(c) filing completed"
    })
}
