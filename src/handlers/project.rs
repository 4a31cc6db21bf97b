//! Project endpoints
//!
//! Listing/detail with the latest-analysis join, validated create/edit, and
//! the synchronous re-analyze trigger. Creation answers immediately with the
//! pending project and hands the analysis off to the background worker.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::AppState;
use crate::entities::rwa_projects;
use crate::models::project::{
    ASSET_TYPES, CreateProjectRequest, ErrorResponse, FieldError, ProjectFilters,
    ProjectWithAnalysis, UpdateProjectRequest, ValidationErrorResponse,
};
use crate::services::analysis_runner;

pub async fn list_projects(
    State(state): State<AppState>,
    Query(filters): Query<ProjectFilters>,
) -> Result<Json<Vec<ProjectWithAnalysis>>, (StatusCode, Json<ErrorResponse>)> {
    let projects = state
        .storage
        .list_projects(&filters)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Database error: {}", e),
                }),
            )
        })?;
    Ok(Json(projects))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectWithAnalysis>, (StatusCode, Json<ErrorResponse>)> {
    let project = state.storage.get_project(&id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Database error: {}", e),
            }),
        )
    })?;

    match project {
        Some(project) => Ok(Json(project)),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Project not found".to_string(),
            }),
        )),
    }
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> Response {
    let errors = validate_create(&payload);
    if !errors.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ValidationErrorResponse {
                error: "Validation failed".to_string(),
                details: errors,
            }),
        )
            .into_response();
    }

    let project = match state.storage.create_project(&payload).await {
        Ok(project) => project,
        Err(e) => {
            tracing::error!(error = %e, "failed to create project");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create project".to_string(),
                }),
            )
                .into_response();
        }
    };

    tracing::info!(project_id = %project.id, name = %project.name, "project created");

    // Fire and forget: the response does not wait for the analysis
    if let Err(e) = state.analysis_queue.try_send(project.id.clone()) {
        tracing::warn!(project_id = %project.id, error = %e, "could not enqueue analysis");
    }

    (StatusCode::CREATED, Json(project)).into_response()
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Response {
    let errors = validate_update(&payload);
    if !errors.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ValidationErrorResponse {
                error: "Validation failed".to_string(),
                details: errors,
            }),
        )
            .into_response();
    }

    match state.storage.update_project(&id, &payload).await {
        Ok(Some(project)) => Json(project).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Project not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(project_id = %id, error = %e, "failed to update project");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update project".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// POST /api/projects/{id}/analyze - runs the full analysis sequence
/// synchronously and returns the refreshed project. Upstream-model failures
/// are absorbed into a fallback analysis, so this still returns 200 for them;
/// only persistence failures surface as errors.
pub async fn analyze_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectWithAnalysis>, (StatusCode, Json<ErrorResponse>)> {
    let project: rwa_projects::Model = state
        .storage
        .get_project_row(&id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Database error: {}", e),
                }),
            )
        })?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Project not found".to_string(),
                }),
            )
        })?;

    analysis_runner::reanalyze_project(&state.storage, &state.analyzer, &project)
        .await
        .map_err(|e| {
            tracing::error!(project_id = %id, error = %e, "re-analysis failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to analyze project".to_string(),
                }),
            )
        })?;

    let updated = state
        .storage
        .get_project(&id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Database error: {}", e),
                }),
            )
        })?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Project not found".to_string(),
                }),
            )
        })?;

    Ok(Json(updated))
}

fn push_error(errors: &mut Vec<FieldError>, field: &str, message: &str) {
    errors.push(FieldError {
        field: field.to_string(),
        message: message.to_string(),
    });
}

fn check_non_empty(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        push_error(errors, field, "must not be empty");
    }
}

fn check_asset_type(errors: &mut Vec<FieldError>, value: &str) {
    if !ASSET_TYPES.contains(&value) {
        push_error(
            errors,
            "asset_type",
            "must be one of real_estate, bonds, invoices, commodities",
        );
    }
}

fn check_total_value(errors: &mut Vec<FieldError>, value: f64) {
    if !value.is_finite() || value < 0.0 {
        push_error(errors, "total_value", "must be zero or greater");
    }
}

fn check_token_supply(errors: &mut Vec<FieldError>, value: i64) {
    if value < 1 {
        push_error(errors, "token_supply", "must be at least 1");
    }
}

fn check_yield_percentage(errors: &mut Vec<FieldError>, value: f64) {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        push_error(errors, "yield_percentage", "must be between 0 and 100");
    }
}

fn validate_create(req: &CreateProjectRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_non_empty(&mut errors, "name", &req.name);
    check_non_empty(&mut errors, "description", &req.description);
    check_non_empty(&mut errors, "token_symbol", &req.token_symbol);
    check_non_empty(&mut errors, "team_info", &req.team_info);
    check_non_empty(&mut errors, "tokenomics", &req.tokenomics);
    check_non_empty(&mut errors, "compliance_info", &req.compliance_info);
    check_asset_type(&mut errors, &req.asset_type);
    check_total_value(&mut errors, req.total_value);
    check_token_supply(&mut errors, req.token_supply);
    check_yield_percentage(&mut errors, req.yield_percentage);

    errors
}

fn validate_update(req: &UpdateProjectRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let Some(name) = &req.name {
        check_non_empty(&mut errors, "name", name);
    }
    if let Some(description) = &req.description {
        check_non_empty(&mut errors, "description", description);
    }
    if let Some(token_symbol) = &req.token_symbol {
        check_non_empty(&mut errors, "token_symbol", token_symbol);
    }
    if let Some(team_info) = &req.team_info {
        check_non_empty(&mut errors, "team_info", team_info);
    }
    if let Some(tokenomics) = &req.tokenomics {
        check_non_empty(&mut errors, "tokenomics", tokenomics);
    }
    if let Some(compliance_info) = &req.compliance_info {
        check_non_empty(&mut errors, "compliance_info", compliance_info);
    }
    if let Some(asset_type) = &req.asset_type {
        check_asset_type(&mut errors, asset_type);
    }
    if let Some(total_value) = req.total_value {
        check_total_value(&mut errors, total_value);
    }
    if let Some(token_supply) = req.token_supply {
        check_token_supply(&mut errors, token_supply);
    }
    if let Some(yield_percentage) = req.yield_percentage {
        check_yield_percentage(&mut errors, yield_percentage);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_request() -> CreateProjectRequest {
        CreateProjectRequest {
            name: "Manhattan Prime Real Estate Token".to_string(),
            description: "Tokenized commercial real estate".to_string(),
            asset_type: "real_estate".to_string(),
            total_value: 125_000_000.0,
            token_symbol: "MPRE".to_string(),
            token_supply: 12_500_000,
            yield_percentage: 7.5,
            contract_address: None,
            website_url: None,
            whitepaper_url: None,
            team_info: "Experienced team".to_string(),
            tokenomics: "12.5M tokens at $10 each".to_string(),
            compliance_info: "SEC Reg D compliant".to_string(),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(validate_create(&make_request()).is_empty());
    }

    #[test]
    fn empty_name_rejected() {
        let mut req = make_request();
        req.name = "  ".to_string();
        let errors = validate_create(&req);
        assert!(errors.iter().any(|e| e.field == "name"));
    }

    #[test]
    fn unknown_asset_type_rejected() {
        let mut req = make_request();
        req.asset_type = "fine_art".to_string();
        let errors = validate_create(&req);
        assert!(errors.iter().any(|e| e.field == "asset_type"));
    }

    #[test]
    fn negative_total_value_rejected() {
        let mut req = make_request();
        req.total_value = -1.0;
        let errors = validate_create(&req);
        assert!(errors.iter().any(|e| e.field == "total_value"));
    }

    #[test]
    fn zero_token_supply_rejected() {
        let mut req = make_request();
        req.token_supply = 0;
        let errors = validate_create(&req);
        assert!(errors.iter().any(|e| e.field == "token_supply"));
    }

    #[test]
    fn yield_out_of_range_rejected() {
        let mut req = make_request();
        req.yield_percentage = 150.0;
        let errors = validate_create(&req);
        assert!(errors.iter().any(|e| e.field == "yield_percentage"));

        req.yield_percentage = -0.1;
        let errors = validate_create(&req);
        assert!(errors.iter().any(|e| e.field == "yield_percentage"));
    }

    #[test]
    fn boundary_values_accepted() {
        let mut req = make_request();
        req.total_value = 0.0;
        req.token_supply = 1;
        req.yield_percentage = 0.0;
        assert!(validate_create(&req).is_empty());

        req.yield_percentage = 100.0;
        assert!(validate_create(&req).is_empty());
    }

    #[test]
    fn multiple_failures_all_reported() {
        let mut req = make_request();
        req.name = String::new();
        req.token_supply = 0;
        req.yield_percentage = 200.0;
        let errors = validate_create(&req);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn update_distinguishes_absent_from_null() {
        let req: UpdateProjectRequest = serde_json::from_value(serde_json::json!({
            "contract_address": null,
            "website_url": "https://example.com"
        }))
        .unwrap();

        assert_eq!(req.contract_address, Some(None));
        assert_eq!(req.website_url, Some(Some("https://example.com".to_string())));
        assert_eq!(req.whitepaper_url, None);
    }

    #[test]
    fn update_validates_only_provided_fields() {
        let req = UpdateProjectRequest::default();
        assert!(validate_update(&req).is_empty());

        let req = UpdateProjectRequest {
            yield_percentage: Some(120.0),
            ..Default::default()
        };
        let errors = validate_update(&req);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "yield_percentage");
    }
}
