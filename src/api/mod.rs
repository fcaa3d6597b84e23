//! HTTP surface for both deployment shapes.

mod error;
mod handlers;
mod serverless;

use std::sync::Arc;

use axum::{
    routing::{any, get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::assistant::Assistant;

pub use error::{ApiError, CHAT_UNAVAILABLE, METHOD_NOT_ALLOWED, NOT_FOUND, VISION_FAILED};

/// Path of the function-style chat endpoint.
pub const SERVERLESS_CHAT_PATH: &str = "/api/chat";

#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<Assistant>,
}

impl AppState {
    pub fn new(assistant: Assistant) -> Self {
        Self {
            assistant: Arc::new(assistant),
        }
    }
}

/// Long-running server: chat and prescription analysis.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ai/chat", post(handlers::chat))
        .route("/ai/analyze-prescription", post(handlers::analyze_prescription))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Function-style deployment: a single chat handler.
pub fn serverless_router(state: AppState) -> Router {
    Router::new()
        .route(SERVERLESS_CHAT_PATH, any(serverless::chat))
        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(app: Router, port: u16) -> std::io::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
