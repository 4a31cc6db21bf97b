use std::env;
use std::sync::Arc;

use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rwalens_backend::jobs::analysis_worker::start_analysis_worker;
use rwalens_backend::services::market_data::seed_market_data;
use rwalens_backend::services::risk_analyzer::RiskAnalyzerService;
use rwalens_backend::storage::{MemStorage, SeaOrmStorage, Storage};
use rwalens_backend::{AppState, build_router};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rwalens_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Storage backend: Postgres when DATABASE_URL is set, in-memory otherwise
    let storage: Arc<dyn Storage> = match env::var("DATABASE_URL") {
        Ok(database_url) => {
            tracing::info!("Connecting to database...");
            let db = Database::connect(&database_url)
                .await
                .expect("Failed to connect to database");

            tracing::info!("Running migrations...");
            migration::Migrator::up(&db, None)
                .await
                .expect("Failed to run migrations");

            Arc::new(SeaOrmStorage::new(db))
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage");
            Arc::new(MemStorage::new())
        }
    };

    if let Err(e) = seed_market_data(&storage).await {
        tracing::error!(error = %e, "failed to seed market data");
    }

    let api_key = env::var("OPENAI_API_KEY").unwrap_or_else(|_| {
        tracing::warn!("OPENAI_API_KEY not set, analyses will use the fallback result");
        String::new()
    });
    let base_url =
        env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
    let model = env::var("RISK_MODEL").unwrap_or_else(|_| "gpt-5".to_string());
    let analyzer = RiskAnalyzerService::new(api_key, base_url, model);

    let analysis_queue = start_analysis_worker(storage.clone(), analyzer.clone());

    let state = AppState {
        storage,
        analyzer,
        analysis_queue,
    };

    let app = build_router(state);

    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind listener");

    tracing::info!(
        "Server listening on {}",
        listener.local_addr().expect("listener has no local addr")
    );

    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
