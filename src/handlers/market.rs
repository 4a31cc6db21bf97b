//! Market data endpoints

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::AppState;
use crate::entities::market_data;
use crate::models::market::MarketDataQuery;
use crate::models::project::ErrorResponse;

pub async fn list_market_data(
    State(state): State<AppState>,
    Query(query): Query<MarketDataQuery>,
) -> Result<Json<Vec<market_data::Model>>, (StatusCode, Json<ErrorResponse>)> {
    let data = state
        .storage
        .list_market_data(query.asset_type.as_deref())
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Database error: {}", e),
                }),
            )
        })?;
    Ok(Json(data))
}
