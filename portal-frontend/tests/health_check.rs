mod common;

use axum::http::{header, StatusCode};
use chrono::{DateTime, SubsecRound, TimeZone, Utc};
use common::{
    body_json, get, router, router_with, test_settings, FailingClock, PanickingClock, TestApp,
};
use portal_frontend::services::FixedClock;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

#[tokio::test]
async fn health_check_returns_healthy_payload() {
    let issued_at = Utc::now().trunc_subsecs(3);

    let response = get(router(), "/api/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["message"], "API is working correctly");

    let timestamp = DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap())
        .expect("timestamp is not ISO-8601");
    assert!(timestamp.with_timezone(&Utc) >= issued_at);
    assert_eq!(body.as_object().unwrap().len(), 3);
}

#[tokio::test]
async fn health_check_matches_documented_example() {
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    let app = router_with(test_settings(), Arc::new(clock));

    let response = get(app, "/api/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "status": "healthy",
            "timestamp": "2024-01-01T00:00:00.000Z",
            "message": "API is working correctly"
        })
    );
}

#[tokio::test]
async fn health_check_reports_clock_fault_as_500() {
    let app = router_with(test_settings(), Arc::new(FailingClock));

    let response = get(app, "/api/health").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Health check failed" })
    );
}

#[tokio::test]
async fn health_check_reports_panic_as_500() {
    let app = router_with(test_settings(), Arc::new(PanickingClock));

    let response = get(app, "/api/health").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Health check failed" })
    );
}

#[tokio::test]
async fn health_check_is_idempotent() {
    let app = router();

    for _ in 0..10 {
        let response = get(app.clone(), "/api/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
    }
}

#[tokio::test]
async fn health_check_survives_concurrent_callers() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();
    let url = format!("{}/api/health", app.address);
    let issued_at = Utc::now().trunc_subsecs(3);

    let responses = futures::future::join_all((0..32).map(|_| {
        let client = client.clone();
        let url = url.clone();
        async move { client.get(&url).send().await }
    }))
    .await;

    let mut request_ids = HashSet::new();
    for response in responses {
        let response = response.expect("Failed to execute request");
        assert_eq!(response.status(), 200);

        request_ids.insert(
            response.headers()["x-request-id"]
                .to_str()
                .unwrap()
                .to_string(),
        );

        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(body["status"], "healthy");
        let timestamp = DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap())
            .expect("timestamp is not ISO-8601");
        assert!(timestamp.with_timezone(&Utc) >= issued_at);
    }

    assert_eq!(request_ids.len(), 32);
}

#[tokio::test]
async fn health_check_rejects_other_methods() {
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    let response = router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
