//! REST API for Eagle
//!
//! - `GET /api/search`: run a people search
//! - `GET /health`: liveness

mod health;
mod search;

use axum::routing::get;
use axum::Router;
use eagle_core::SearchService;
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SearchService>,
    pub default_limit: usize,
    /// Cancelled when the server shuts down
    pub shutdown: CancellationToken,
}

/// Failure envelope
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub success: bool,
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/search", get(search::search))
        .route("/health", get(health::health))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
