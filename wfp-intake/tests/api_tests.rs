//! HTTP API integration tests
//!
//! Exercise the router with in-process requests: routing, acknowledgment
//! semantics, and the error responses the form transport can see.

mod helpers;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use helpers::{
    memory_store, petition_submission, seed_campaign, seed_completed_status, set_field,
    test_app_state,
};
use wfp_intake::build_router;
use wfp_intake::models::WebformSubmission;

async fn post_submission(
    app: axum::Router,
    submission: &WebformSubmission,
) -> (StatusCode, Value) {
    let body = serde_json::to_string(submission).unwrap();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webform/process")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(json!(null));
    (status, value)
}

#[tokio::test]
async fn health_reports_module_and_status() {
    let store = memory_store().await;
    let app = build_router(test_app_state(&store).await);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "wfp-intake");
    assert!(body["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn valid_submission_is_acknowledged_and_processed() {
    let store = memory_store().await;
    seed_completed_status(&store).await;
    seed_campaign(&store, 42, "Save the Wetlands").await;
    let app = build_router(test_app_state(&store).await);

    let (status, body) = post_submission(app, &petition_submission()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
    assert_eq!(helpers::count_rows(&store, "activities").await, 1);
    assert_eq!(helpers::count_rows(&store, "contacts").await, 2);
}

#[tokio::test]
async fn rejected_submission_is_still_acknowledged() {
    let store = memory_store().await;
    seed_completed_status(&store).await;
    let app = build_router(test_app_state(&store).await);

    let mut submission = petition_submission();
    set_field(&mut submission, "petition_email", "not-an-email");
    let (status, body) = post_submission(app, &submission).await;

    // The form transport gets its success either way; the rejection only
    // shows up in the logs and the absence of new rows.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
    assert_eq!(helpers::count_rows(&store, "contacts").await, 1);
}

#[tokio::test]
async fn missing_processing_class_is_bad_request() {
    let store = memory_store().await;
    let app = build_router(test_app_state(&store).await);

    let mut submission = petition_submission();
    submission.data.retain(|f| f.field_key != "processing_class");
    let (status, body) = post_submission(app, &submission).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("processing_class"));
}

#[tokio::test]
async fn unknown_processing_class_is_bad_request() {
    let store = memory_store().await;
    let app = build_router(test_app_state(&store).await);

    let mut submission = petition_submission();
    set_field(&mut submission, "processing_class", "Donation");
    let (status, body) = post_submission(app, &submission).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("Donation"));
}

#[tokio::test]
async fn missing_webform_title_is_bad_request() {
    let store = memory_store().await;
    let app = build_router(test_app_state(&store).await);

    let mut submission = petition_submission();
    submission.webform_title = String::new();
    let (status, body) = post_submission(app, &submission).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("webform_title"));
}

#[tokio::test]
async fn routing_is_case_insensitive() {
    let store = memory_store().await;
    seed_completed_status(&store).await;
    let app = build_router(test_app_state(&store).await);

    let mut submission = petition_submission();
    set_field(&mut submission, "processing_class", "PETITION");
    let (status, body) = post_submission(app, &submission).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
}
