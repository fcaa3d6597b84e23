use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::{Error, ErrorKind};
use crate::models::ErrorResponse;

pub const CHAT_UNAVAILABLE: &str = "Assistente temporariamente indisponível.";
pub const VISION_FAILED: &str = "Erro na análise de visão";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const NOT_FOUND: &str = "Not found";

/// Wire-level error: a status code and the message the client is allowed to see.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Validation errors keep their own message; anything else is logged and
    /// replaced by `generic_message`.
    pub fn from_error(err: Error, generic_message: &str) -> Self {
        match (err.kind(), err) {
            (ErrorKind::Validation, Error::Validation(message)) => {
                tracing::warn!("Rejected request: {}", message);
                Self::new(StatusCode::BAD_REQUEST, message)
            }
            (kind, err) => {
                tracing::error!(?kind, "{} ({})", generic_message, err);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, generic_message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}
