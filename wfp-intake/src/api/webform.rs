//! Webform submission endpoint
//!
//! POST /webform/process receives the raw form payload, routes it to the
//! handler named by the processing class field, and acknowledges. Once
//! routing succeeds the transport always gets a plain success; processing
//! outcomes live in the log stream, keyed by submission id, so a slow or
//! partially failed pipeline never breaks the form's callback.

use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::models::{WebformSubmission, FIELD_PROCESSING_CLASS};
use crate::AppState;

/// POST /webform/process
pub async fn process_webform(
    State(state): State<AppState>,
    Json(submission): Json<WebformSubmission>,
) -> ApiResult<Json<Value>> {
    if submission.webform_title.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "webform_title is required".to_string(),
        ));
    }

    let Some(class) = submission.processing_class() else {
        return Err(ApiError::BadRequest(format!(
            "field '{FIELD_PROCESSING_CLASS}' is required"
        )));
    };

    let Some(handler) = state.registry.get(class) else {
        return Err(ApiError::BadRequest(format!(
            "no handler for processing class '{class}'"
        )));
    };

    let outcome = handler.process(&submission).await;
    tracing::debug!(
        submission_id = %outcome.submission_id,
        state = ?outcome.state,
        "submission acknowledged"
    );

    Ok(Json(json!({ "success": true })))
}

/// Build webform routes
pub fn webform_routes() -> Router<AppState> {
    Router::new().route("/webform/process", post(process_webform))
}
