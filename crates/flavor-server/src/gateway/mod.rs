//! HTTP gateway (Axum) for search, explanations and index seeding.
//!
//! This module is primarily used by the `flavor-server` binary.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{client_id, explain_handler, search_handler, seed_handler};
pub use state::{AppState, StateSettings};

pub const STATUS_READY: &str = "ready";
pub const STATUS_ERROR: &str = "error";

pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/search", get(search_handler))
        .route("/explain", post(explain_handler))
        .route("/seed", post(seed_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub vectordb: &'static str,
    pub embedder_mode: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let vectordb = match state.index.health_check().await {
        Ok(()) => STATUS_READY,
        Err(e) => {
            tracing::warn!(error = %e, "index not reachable");
            STATUS_ERROR
        }
    };

    let components = ComponentStatus {
        http: STATUS_READY,
        vectordb,
        embedder_mode: if state.embedder_is_stub { "stub" } else { "real" },
    };

    let is_ready = components.vectordb == STATUS_READY;
    let (status_code, status) = if is_ready {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "pending")
    };

    (status_code, Json(ReadyResponse { status, components })).into_response()
}
