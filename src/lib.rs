// src/lib.rs

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, post},
};
use tokio::sync::mpsc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use services::risk_analyzer::RiskAnalyzerService;
use storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub analyzer: RiskAnalyzerService,
    pub analysis_queue: mpsc::Sender<String>,
}

pub mod entities {
    pub mod prelude;
    pub mod investment_recommendations;
    pub mod market_data;
    pub mod risk_alerts;
    pub mod risk_analyses;
    pub mod rwa_projects;
}

pub mod services {
    pub mod analysis_runner;
    pub mod market_data;
    pub mod risk_analyzer;
}

pub mod handlers;
pub mod jobs;
pub mod models;
pub mod storage;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route(
            "/api/projects",
            get(handlers::project::list_projects).post(handlers::project::create_project),
        )
        .route(
            "/api/projects/{id}",
            get(handlers::project::get_project).patch(handlers::project::update_project),
        )
        .route(
            "/api/projects/{id}/analyze",
            post(handlers::project::analyze_project),
        )
        .route("/api/alerts", get(handlers::alert::list_alerts))
        .route(
            "/api/alerts/{id}/read",
            patch(handlers::alert::mark_alert_read),
        )
        .route(
            "/api/recommendations",
            get(handlers::recommendation::list_recommendations),
        )
        .route("/api/market-data", get(handlers::market::list_market_data))
        .route("/api/stats", get(handlers::stats::get_stats))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "RWA Lens backend is running"
}
