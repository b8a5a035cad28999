use axum::extract::State;
use axum::{routing::get, Json, Router};
use pulse_core::types::Timestamp;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database does not answer.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the observation database is reachable.
    pub db_healthy: bool,
    /// Number of subjects in the range snapshot.
    pub subjects: usize,
    /// When the snapshot was built.
    pub loaded_at: Timestamp,
}

/// GET /health -- returns service and database health plus snapshot size.
///
/// Ranges keep being served from the snapshot while the database is down,
/// so a failed check only degrades the status.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = pulse_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        subjects: state.ranges.len(),
        loaded_at: state.ranges.loaded_at(),
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
