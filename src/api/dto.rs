//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::frame::{Environment, Microfrontend, Origin};

// ============================================
// FRAME DTOs
// ============================================

/// Query for `GET /api/v1/frame`
#[derive(Debug, Deserialize)]
pub struct FrameQuery {
    /// Host path, e.g. `/novatrace/status`
    pub path: String,
}

/// Resolved iframe source for a host path
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct FrameResponse {
    pub path: String,
    pub microfrontend: String,
    pub sub_path: String,
    pub src: String,
    pub environment: Environment,
}

/// One route table entry with its URLs for the active environment
#[derive(Debug, Serialize, Deserialize)]
pub struct MicrofrontendResponse {
    pub id: String,
    pub title: String,
    pub host_prefix: String,
    pub routes: Vec<SubRouteResponse>,
}

/// One internal route of a microfrontend
#[derive(Debug, Serialize, Deserialize)]
pub struct SubRouteResponse {
    pub sub_path: String,
    pub host_path: String,
    pub src: String,
}

impl MicrofrontendResponse {
    pub fn from_entry(entry: &Microfrontend, environment: Environment) -> Self {
        Self {
            id: entry.id.clone(),
            title: entry.title.clone(),
            host_prefix: entry.host_prefix.clone(),
            routes: entry
                .sub_paths
                .iter()
                .map(|sub| SubRouteResponse {
                    sub_path: sub.clone(),
                    host_path: entry.host_path(sub),
                    src: entry.frame_url(sub, environment),
                })
                .collect(),
        }
    }
}

/// Response for `GET /api/v1/routes`
#[derive(Debug, Serialize, Deserialize)]
pub struct RouteTableResponse {
    pub environment: Environment,
    pub microfrontends: Vec<MicrofrontendResponse>,
    pub total: usize,
}

/// Response for `GET /api/v1/origins`
#[derive(Debug, Serialize, Deserialize)]
pub struct OriginsResponse {
    pub environment: Environment,
    pub origins: Vec<Origin>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    pub environment: Environment,
    /// Bundles present on disk, by id
    pub bundles: Vec<BundleHealth>,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Bundle availability
#[derive(Debug, Serialize, Deserialize)]
pub struct BundleHealth {
    pub id: String,
    pub present: bool,
}
