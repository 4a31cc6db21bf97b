//! Investment recommendation endpoints

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::AppState;
use crate::entities::investment_recommendations;
use crate::models::alert::ProjectScopeQuery;
use crate::models::project::ErrorResponse;

pub async fn list_recommendations(
    State(state): State<AppState>,
    Query(query): Query<ProjectScopeQuery>,
) -> Result<Json<Vec<investment_recommendations::Model>>, (StatusCode, Json<ErrorResponse>)> {
    let recommendations = state
        .storage
        .list_recommendations(query.project_id.as_deref())
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Database error: {}", e),
                }),
            )
        })?;
    Ok(Json(recommendations))
}
