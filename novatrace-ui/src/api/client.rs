//! HTTP API Client
//!
//! Read-only access to the alert backend, plus the shell server's manifest.
//! The backend itself is a separate service; the dashboards only list what
//! it returns.

use gloo_net::http::Request;
use novatrace::frame::ShellManifest;
use novatrace::records::{Alert, BrokerStatus, Event};
use serde::de::DeserializeOwned;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

const API_URL_KEY: &str = "novatrace_api_url";

/// API base URL: local storage override, then build-time `NOVATRACE_API_URL`,
/// then the default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten());

    let url = stored
        .or_else(|| option_env!("NOVATRACE_API_URL").map(str::to_string))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
pub struct AlertListResponse {
    pub alerts: Vec<Alert>,
}

#[derive(Debug, serde::Deserialize)]
pub struct EventListResponse {
    pub events: Vec<Event>,
}

#[derive(Debug, serde::Deserialize)]
pub struct StatusResponse {
    pub brokers: Vec<BrokerStatus>,
}

#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    pub error: String,
    #[serde(default)]
    pub code: Option<String>,
}

// ============ API Functions ============

/// Fetch recent alerts
pub async fn fetch_alerts() -> Result<Vec<Alert>, String> {
    let result: AlertListResponse = get_json("/alerts").await?;
    Ok(result.alerts)
}

/// Fetch recent events
pub async fn fetch_events() -> Result<Vec<Event>, String> {
    let result: EventListResponse = get_json("/events").await?;
    Ok(result.events)
}

/// Fetch per-broker status
pub async fn fetch_broker_status() -> Result<Vec<BrokerStatus>, String> {
    let result: StatusResponse = get_json("/status").await?;
    Ok(result.brokers)
}

/// Fetch the route table and allow-list the shell server at `shell_base`
/// runs with (`""` for the page's own origin)
pub async fn fetch_manifest(shell_base: &str) -> Result<ShellManifest, String> {
    let manifest: ShellManifest = get_json_from(shell_base, "/api/v1/manifest").await?;
    manifest.route_table().map_err(|e| e.to_string())?;
    Ok(manifest)
}

/// [`fetch_manifest`], falling back to the built-in table when the shell
/// server is unreachable or sends an invalid table
pub async fn load_manifest(shell_base: String) -> ShellManifest {
    match fetch_manifest(&shell_base).await {
        Ok(manifest) => manifest,
        Err(e) => {
            web_sys::console::warn_1(
                &format!("Shell manifest unavailable, using built-in routes: {}", e).into(),
            );
            ShellManifest::standard(crate::settings::environment())
        }
    }
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    get_json_from(&get_api_base(), path).await
}

async fn get_json_from<T: DeserializeOwned>(base: &str, path: &str) -> Result<T, String> {
    let response = Request::get(&format!("{}{}", base, path))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let error: ApiError = response.json().await.unwrap_or(ApiError {
            error: format!("Request failed with status {}", response.status()),
            code: None,
        });
        return Err(error.error);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}
