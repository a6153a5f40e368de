//! NovaTrace Shell Server
//!
//! HTTP layer for the shell, built with Axum.
//!
//! # Endpoints
//!
//! ## Frames
//! - `GET /api/v1/routes` - Route table with frame URLs for the active environment
//! - `GET /api/v1/frame?path=...` - Resolve the iframe source for a host path
//! - `GET /api/v1/origins` - Origins allowed to post navigation messages
//! - `GET /api/v1/manifest` - Everything the browser bundles route with
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## Bundles
//! - Every other path serves the shell or a microfrontend bundle
//!   (see [`routes::bundles`])
//!
//! # Example
//!
//! ```rust,ignore
//! use novatrace::api::{serve, AppState};
//! use novatrace::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let state = AppState::from_config(&config)?;
//!     serve(state).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::frame::Environment;

/// Bundle directory name of the shell application itself
pub const SHELL_BUNDLE: &str = "shell";

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/routes", get(routes::frames::list_routes))
        .route("/frame", get(routes::frames::get_frame))
        .route("/origins", get(routes::frames::list_origins))
        .route("/manifest", get(routes::frames::get_manifest));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Dev servers on other ports query the API cross-origin
    let cors = match state.environment() {
        Environment::Development => CorsLayer::permissive(),
        Environment::Production => CorsLayer::new(),
    };
    let timeout = Duration::from_millis(state.config.request_timeout_ms);

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .fallback(routes::bundles::serve_bundle)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        .with_state(shared_state)
}

/// Start the shell server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.addr();
    let environment = state.environment();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("NovaTrace shell listening on {} ({})", addr, environment);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("NovaTrace shell shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{FrameResponse, HealthResponse, OriginsResponse, RouteTableResponse};
    use crate::frame::{HostFrameResolver, Microfrontend, Origin, RouteTable, ShellManifest};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    fn create_test_app(environment: Environment, bundle_dir: &std::path::Path) -> Router {
        create_app_with_table(RouteTable::standard(), environment, bundle_dir)
    }

    fn create_app_with_table(
        table: RouteTable,
        environment: Environment,
        bundle_dir: &std::path::Path,
    ) -> Router {
        let resolver = HostFrameResolver::new(table, environment);
        let origins = resolver.origin_policy(&Origin::parse("http://localhost:8090").unwrap());
        let config = ApiConfig {
            bundle_dir: bundle_dir.to_path_buf(),
            ..ApiConfig::default()
        };
        build_router(AppState::new(resolver, origins, config))
    }

    async fn send_get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn write_bundle(root: &std::path::Path, id: &str, marker: &str) {
        let dir = root.join(id);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), format!("<html>{}</html>", marker)).unwrap();
    }

    #[tokio::test]
    async fn test_health_live() {
        let dir = tempdir().unwrap();
        let response = send_get(create_test_app(Environment::Production, dir.path()), "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_requires_bundles_in_production() {
        let dir = tempdir().unwrap();
        let response =
            send_get(create_test_app(Environment::Production, dir.path()), "/health/ready").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        for id in ["shell", "home", "novatrace"] {
            write_bundle(dir.path(), id, id);
        }
        let response =
            send_get(create_test_app(Environment::Production, dir.path()), "/health/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_in_development() {
        let dir = tempdir().unwrap();
        let response =
            send_get(create_test_app(Environment::Development, dir.path()), "/health/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let dir = tempdir().unwrap();
        write_bundle(dir.path(), "shell", "shell");

        let response = send_get(create_test_app(Environment::Production, dir.path()), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let health: HealthResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(health.status, "degraded");
        assert_eq!(health.bundles.len(), 3);
        assert!(health.bundles.iter().any(|b| b.id == "shell" && b.present));
    }

    #[tokio::test]
    async fn test_frame_development() {
        let dir = tempdir().unwrap();
        let response = send_get(
            create_test_app(Environment::Development, dir.path()),
            "/api/v1/frame?path=/novatrace/status",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let frame: FrameResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(frame.microfrontend, "novatrace");
        assert_eq!(frame.sub_path, "/status");
        assert_eq!(frame.src, "http://localhost:5174/status");
        assert_eq!(frame.environment, Environment::Development);
    }

    #[tokio::test]
    async fn test_frame_production() {
        let dir = tempdir().unwrap();
        let response = send_get(
            create_test_app(Environment::Production, dir.path()),
            "/api/v1/frame?path=%2Fnovatrace",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let frame: FrameResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(frame.src, "/novatrace/");
    }

    #[tokio::test]
    async fn test_frame_not_found() {
        let dir = tempdir().unwrap();
        let response = send_get(
            create_test_app(Environment::Production, dir.path()),
            "/api/v1/frame?path=/nowhere",
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_string(response).await.contains("NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_frame_relative_path_rejected() {
        let dir = tempdir().unwrap();
        let response = send_get(
            create_test_app(Environment::Production, dir.path()),
            "/api/v1/frame?path=novatrace",
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_routes() {
        let dir = tempdir().unwrap();
        let response =
            send_get(create_test_app(Environment::Production, dir.path()), "/api/v1/routes").await;
        assert_eq!(response.status(), StatusCode::OK);

        let table: RouteTableResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(table.total, 2);
        let novatrace = table
            .microfrontends
            .iter()
            .find(|m| m.id == "novatrace")
            .unwrap();
        let srcs: Vec<&str> = novatrace.routes.iter().map(|r| r.src.as_str()).collect();
        assert_eq!(srcs, vec!["/novatrace/", "/novatrace/status", "/novatrace/events"]);
    }

    #[tokio::test]
    async fn test_list_origins() {
        let dir = tempdir().unwrap();
        let response =
            send_get(create_test_app(Environment::Development, dir.path()), "/api/v1/origins").await;
        let origins: OriginsResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(origins.origins.len(), 3);
    }

    #[tokio::test]
    async fn test_manifest_carries_configured_table() {
        let dir = tempdir().unwrap();
        let table = RouteTable::new(vec![
            Microfrontend::new("home", "/", Origin::localhost(5173), "/home"),
            Microfrontend::new("novatrace", "/novatrace", Origin::localhost(5174), "/nt")
                .sub_path("/status"),
        ])
        .unwrap();
        let app = create_app_with_table(table, Environment::Production, dir.path());

        let response = send_get(app.clone(), "/api/v1/manifest").await;
        assert_eq!(response.status(), StatusCode::OK);
        let manifest: ShellManifest = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(manifest.environment, Environment::Production);
        assert_eq!(manifest.origins, vec![Origin::parse("http://localhost:8090").unwrap()]);

        // the browser resolves the same src the server does
        let rebuilt = manifest.route_table().unwrap();
        let response = send_get(app, "/api/v1/frame?path=/novatrace/status").await;
        let frame: FrameResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(frame.src, "/nt/status");
        assert_eq!(
            rebuilt.resolve_frame_url("/novatrace/status", manifest.environment),
            Some(frame.src)
        );
    }

    #[tokio::test]
    async fn test_serves_shell_and_bundles() {
        let dir = tempdir().unwrap();
        write_bundle(dir.path(), "shell", "shell");
        write_bundle(dir.path(), "novatrace", "novatrace");
        let app = create_test_app(Environment::Production, dir.path());

        // iframe load of a client-side route falls back to the bundle index
        let response = send_get(app.clone(), "/novatrace/events").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("novatrace"));

        // top-level navigation to a host route gets the shell
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/novatrace/events")
                    .header("sec-fetch-dest", "document")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("shell"));

        // clients without fetch metadata: an HTML page load still gets the shell
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/novatrace/status")
                    .header("accept", "text/html")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(body_string(response).await.contains("shell"));

        let response = send_get(app, "/").await;
        assert!(body_string(response).await.contains("shell"));
    }
}
