//! Frame Routes
//!
//! Route table and frame resolution endpoints for the shell.
//!
//! - GET /api/v1/routes - Route table with frame URLs for the active environment
//! - GET /api/v1/frame?path=/novatrace/status - Resolve one host path
//! - GET /api/v1/origins - Navigation message origin allow-list
//! - GET /api/v1/manifest - Table, environment and origins for browser bundles

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{
    FrameQuery, FrameResponse, MicrofrontendResponse, OriginsResponse, RouteTableResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::frame::{FrameError, ShellManifest};

/// GET /api/v1/frame
///
/// Resolve the iframe source the shell mounts for a host path.
pub async fn get_frame(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FrameQuery>,
) -> ApiResult<Json<FrameResponse>> {
    if !query.path.starts_with('/') {
        return Err(FrameError::InvalidPath(query.path).into());
    }

    let entry = state
        .resolver
        .lookup(&query.path)
        .ok_or_else(|| ApiError::NotFound(format!("No microfrontend mounted at '{}'", query.path)))?;

    let environment = state.environment();
    Ok(Json(FrameResponse {
        microfrontend: entry.microfrontend.id.clone(),
        sub_path: entry.sub_path.to_string(),
        src: entry.microfrontend.frame_url(entry.sub_path, environment),
        environment,
        path: query.path,
    }))
}

/// GET /api/v1/routes
///
/// List every microfrontend with the frame URL of each internal route.
pub async fn list_routes(State(state): State<Arc<AppState>>) -> Json<RouteTableResponse> {
    let environment = state.environment();
    let microfrontends: Vec<MicrofrontendResponse> = state
        .table()
        .entries()
        .iter()
        .map(|entry| MicrofrontendResponse::from_entry(entry, environment))
        .collect();

    Json(RouteTableResponse {
        environment,
        total: microfrontends.len(),
        microfrontends,
    })
}

/// GET /api/v1/origins
pub async fn list_origins(State(state): State<Arc<AppState>>) -> Json<OriginsResponse> {
    Json(OriginsResponse {
        environment: state.environment(),
        origins: state.origins.origins().cloned().collect(),
    })
}

/// GET /api/v1/manifest
///
/// The shell page and guest bundles build their router and allow-list from
/// this instead of a compiled-in table.
pub async fn get_manifest(State(state): State<Arc<AppState>>) -> Json<ShellManifest> {
    Json(ShellManifest::new(
        state.table(),
        state.environment(),
        &state.origins,
    ))
}
