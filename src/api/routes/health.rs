//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{BundleHealth, HealthResponse};
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// In production every bundle must be on disk. Development frames come from
/// their own dev servers, so the shell is always ready.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if !state.environment().is_production() {
        return StatusCode::OK;
    }

    if check_bundles(&state).iter().all(|b| b.present) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status with bundle details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let bundles = check_bundles(&state);
    let all_present = bundles.iter().all(|b| b.present);

    let status = if all_present || !state.environment().is_production() {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        environment: state.environment(),
        bundles,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Check that the shell bundle and each microfrontend bundle has an index.html
fn check_bundles(state: &AppState) -> Vec<BundleHealth> {
    std::iter::once(crate::api::SHELL_BUNDLE)
        .chain(state.table().entries().iter().map(|e| e.id.as_str()))
        .map(|id| BundleHealth {
            id: id.to_string(),
            present: state.config.bundle_path(id).join("index.html").is_file(),
        })
        .collect()
}
