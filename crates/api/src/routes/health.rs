//! Liveness endpoint, mounted at the root rather than under `/api/v1`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// `"ok"`, or `"degraded"` when Postgres cannot be reached.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Open pool connections and how many of them are idle.
    pub pool_connections: u32,
    pub pool_idle: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let db_healthy = match placement_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Database unreachable from health check");
            false
        }
    };

    Json(HealthStatus {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        pool_connections: state.pool.size(),
        pool_idle: state.pool.num_idle(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
