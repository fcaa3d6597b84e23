use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::assistant::ChatVariant;
use crate::models::{AnalysisOutcome, ChatRequest, ChatResponse, PrescriptionRequest};

use super::error::{ApiError, CHAT_UNAVAILABLE, NOT_FOUND, VISION_FAILED};
use super::AppState;

/// An unreadable body is handled like an empty one, so required-field checks
/// produce the usual 400.
pub(crate) fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Value {
    match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!("Unreadable JSON body: {}", rejection);
            Value::Null
        }
    }
}

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let request = ChatRequest::from_json(&json_body(payload));

    state
        .assistant
        .chat(&request, ChatVariant::Server)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_error(e, CHAT_UNAVAILABLE))
}

pub async fn analyze_prescription(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalysisOutcome>, ApiError> {
    let request = PrescriptionRequest::from_json(&json_body(payload));

    state
        .assistant
        .analyze_prescription(&request)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_error(e, VISION_FAILED))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn not_found() -> Response {
    ApiError::new(StatusCode::NOT_FOUND, NOT_FOUND).into_response()
}
