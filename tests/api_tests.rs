// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Router-level tests: health, CORS and store failures.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{body_json, create_offline_app, create_test_app, json_request};

#[tokio::test]
async fn test_health_check() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(json_request("GET", "/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/workouts")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn test_store_failure_is_500_without_details() {
    let app = create_offline_app();

    for uri in ["/api/users", "/api/workouts", "/api/users/U1"] {
        let response = app
            .clone()
            .oneshot(json_request("GET", uri, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "database_error");
        assert!(body.get("details").is_none());
    }
}

#[tokio::test]
async fn test_validation_runs_before_store_access() {
    let app = create_offline_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/workouts",
            Some(json!({ "workout_id": "W1" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_on_failing_store_is_500() {
    let app = create_offline_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/users",
            Some(json!({ "user_id": "U1", "name": "Ana" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
