//! Background analysis worker
//!
//! Project creation must return immediately, so the handler only pushes the
//! project id onto this queue. The worker drains it sequentially and runs the
//! full analysis sequence; failures are logged and the project reverts to
//! "pending", observable via the project status rather than the HTTP request
//! that triggered it.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::services::analysis_runner;
use crate::services::risk_analyzer::RiskAnalyzerService;
use crate::storage::Storage;

/// Pending analyses beyond this are rejected at enqueue time
const QUEUE_CAPACITY: usize = 64;

pub fn start_analysis_worker(
    storage: Arc<dyn Storage>,
    analyzer: RiskAnalyzerService,
) -> mpsc::Sender<String> {
    let (tx, mut rx) = mpsc::channel::<String>(QUEUE_CAPACITY);

    tokio::spawn(async move {
        tracing::info!("analysis worker started");

        while let Some(project_id) = rx.recv().await {
            tracing::info!(project_id = %project_id, "starting queued analysis");
            analysis_runner::analyze_in_background(&storage, &analyzer, &project_id).await;
        }

        tracing::info!("analysis queue closed, worker exiting");
    });

    tx
}
