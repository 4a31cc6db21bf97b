//! Alert feed endpoints

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::AppState;
use crate::entities::risk_alerts;
use crate::models::alert::{MarkReadResponse, ProjectScopeQuery};
use crate::models::project::ErrorResponse;

pub async fn list_alerts(
    State(state): State<AppState>,
    Query(query): Query<ProjectScopeQuery>,
) -> Result<Json<Vec<risk_alerts::Model>>, (StatusCode, Json<ErrorResponse>)> {
    let alerts = state
        .storage
        .list_alerts(query.project_id.as_deref())
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Database error: {}", e),
                }),
            )
        })?;
    Ok(Json(alerts))
}

/// Idempotent: re-marking a read alert succeeds
pub async fn mark_alert_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MarkReadResponse>, (StatusCode, Json<ErrorResponse>)> {
    let found = state.storage.mark_alert_read(&id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Database error: {}", e),
            }),
        )
    })?;

    if !found {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Alert not found".to_string(),
            }),
        ));
    }

    Ok(Json(MarkReadResponse { success: true }))
}
