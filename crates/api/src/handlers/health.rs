//! Liveness endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    db_healthy: bool,
}

/// GET /health
///
/// Always 200; `db_healthy` reports whether recipient lookups can reach
/// Postgres.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match booking_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}
