//! Platform aggregate stats

use axum::{Json, extract::State, http::StatusCode};

use crate::AppState;
use crate::models::project::ErrorResponse;
use crate::models::stats::StatsResponse;

pub async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let stats = state.storage.stats().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Database error: {}", e),
            }),
        )
    })?;
    Ok(Json(stats))
}
