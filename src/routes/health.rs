//! Health check endpoints for liveness and readiness probes.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::db::Store;
use crate::errors::ApiResponse;
use crate::AppState;

/// Readiness probe detail.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub store: String,
    pub store_target: String,
}

/// Liveness probe — always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness probe — reports which store backend is configured. Does not
/// fetch collections; a dashboard activation is the only thing that does.
pub async fn ready(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    let target = match state.store.as_ref() {
        Store::Http(s) => s.base_url().to_string(),
        Store::Fixture(s) => {
            let path = s.path();
            if !path.exists() {
                tracing::warn!(path = %path.display(), "Fixture file missing");
            }
            path.display().to_string()
        }
    };

    ApiResponse::success(HealthStatus {
        status: "ok".to_string(),
        store: state.store.kind().to_string(),
        store_target: target,
    })
}
