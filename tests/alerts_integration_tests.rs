mod common;

use axum::http::StatusCode;
use std::time::Duration;

use rwalens_backend::AppState;
use rwalens_backend::models::alert::AlertDraft;

use crate::common::{DEAD_UPSTREAM, request_json, test_app, test_state};

async fn seed_alert(state: &AppState, project_id: &str, title: &str) -> String {
    let alert = state
        .storage
        .create_alert(&AlertDraft {
            project_id: project_id.to_string(),
            alert_type: "risk_increase".to_string(),
            severity: "warning".to_string(),
            title: title.to_string(),
            message: "Seeded alert".to_string(),
            previous_value: None,
            new_value: Some(42.0),
        })
        .await
        .expect("seed alert");
    alert.id
}

#[tokio::test]
async fn alerts_list_newest_first_and_scoped_by_project() {
    let state = test_state(DEAD_UPSTREAM);
    seed_alert(&state, "project-a", "first").await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    seed_alert(&state, "project-b", "second").await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    seed_alert(&state, "project-a", "third").await;
    let app = test_app(state);

    let (status, body) = request_json(&app, "GET", "/api/alerts", None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .expect("alert list")
        .iter()
        .map(|a| a["title"].as_str().expect("title"))
        .collect();
    assert_eq!(titles, vec!["third", "second", "first"]);

    let (_, body) = request_json(&app, "GET", "/api/alerts?project_id=project-b", None).await;
    let scoped = body.as_array().expect("alert list");
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0]["title"], "second");
    assert_eq!(scoped[0]["is_read"], false);
}

#[tokio::test]
async fn mark_alert_read_is_idempotent() {
    let state = test_state(DEAD_UPSTREAM);
    let alert_id = seed_alert(&state, "project-a", "unread").await;
    let app = test_app(state);

    let uri = format!("/api/alerts/{alert_id}/read");

    let (status, body) = request_json(&app, "PATCH", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    // second call succeeds too
    let (status, body) = request_json(&app, "PATCH", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, body) = request_json(&app, "GET", "/api/alerts", None).await;
    assert_eq!(body[0]["is_read"], true);
}

#[tokio::test]
async fn mark_unknown_alert_returns_404() {
    let app = test_app(test_state(DEAD_UPSTREAM));

    let (status, body) = request_json(&app, "PATCH", "/api/alerts/missing/read", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Alert not found");
}

#[tokio::test]
async fn recommendations_scoped_by_project() {
    use rwalens_backend::models::analysis::RecommendationDraft;

    let state = test_state(DEAD_UPSTREAM);
    for (project, tolerance) in [("p1", "conservative"), ("p1", "moderate"), ("p2", "aggressive")] {
        state
            .storage
            .create_recommendation(
                project,
                &RecommendationDraft {
                    risk_tolerance: tolerance.to_string(),
                    recommendation: "hold".to_string(),
                    suggested_allocation: 2.0,
                    reasoning: "Seeded".to_string(),
                },
            )
            .await
            .expect("seed recommendation");
    }
    let app = test_app(state);

    let (status, body) = request_json(&app, "GET", "/api/recommendations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(3));

    let (_, body) = request_json(&app, "GET", "/api/recommendations?project_id=p1", None).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}
