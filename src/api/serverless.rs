//! Single-endpoint chat handler for function-style deployments.
//!
//! Accepts any method so that non-POST requests get a JSON 405 instead of the
//! router's default empty response.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode},
    Json,
};
use serde_json::Value;

use crate::assistant::ChatVariant;
use crate::models::{ChatRequest, ChatResponse};

use super::error::{ApiError, CHAT_UNAVAILABLE, METHOD_NOT_ALLOWED};
use super::handlers::json_body;
use super::AppState;

pub async fn chat(
    State(state): State<AppState>,
    method: Method,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    if method != Method::POST {
        return Err(ApiError::new(
            StatusCode::METHOD_NOT_ALLOWED,
            METHOD_NOT_ALLOWED,
        ));
    }

    let request = ChatRequest::from_json(&json_body(payload));

    state
        .assistant
        .chat(&request, ChatVariant::Serverless)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_error(e, CHAT_UNAVAILABLE))
}
