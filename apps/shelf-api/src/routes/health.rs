//! Liveness of the HTTP server and its store.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// 200 `{"status":"healthy"}` when the store answers `SELECT 1`,
/// 503 `{"status":"unhealthy"}` otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if state.catalog.health().await {
        (StatusCode::OK, Json(HealthResponse { status: "healthy" }))
    } else {
        warn!("Health check failed: store unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unhealthy",
            }),
        )
    }
}
