//! Bundle Routes
//!
//! Serves the built single-page bundles from `<bundle_dir>/<id>/`.
//!
//! Production frame sources and shell host paths share a namespace
//! (`/novatrace/status` is both). A top-level document navigation to a shell
//! host path gets the shell; everything else under a production base (iframe
//! loads, scripts, styles) gets that microfrontend's bundle. Unknown files
//! fall back to the bundle's `index.html` so client-side routes resolve.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Uri},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower::util::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::api::SHELL_BUNDLE;
use crate::frame::RouteTable;

/// Which bundle answers a request, and the path inside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleTarget {
    pub bundle: String,
    pub path: String,
}

/// Pick the bundle for a request path
pub fn select_bundle(table: &RouteTable, request_path: &str, is_document: bool) -> BundleTarget {
    let shell = || BundleTarget {
        bundle: SHELL_BUNDLE.to_string(),
        path: request_path.to_string(),
    };

    if is_document && table.lookup(request_path).is_some() {
        return shell();
    }

    for entry in table.entries() {
        let base = entry.prod_base.trim_end_matches('/');
        if let Some(rest) = request_path.strip_prefix(base) {
            if rest.is_empty() || rest.starts_with('/') {
                return BundleTarget {
                    bundle: entry.id.clone(),
                    path: if rest.is_empty() { "/".to_string() } else { rest.to_string() },
                };
            }
        }
    }

    shell()
}

/// Fallback handler for every path that is not part of the API
pub async fn serve_bundle(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let is_document = is_document_request(request.headers());

    let target = select_bundle(state.table(), request.uri().path(), is_document);
    tracing::debug!(
        path = %request.uri().path(),
        bundle = %target.bundle,
        is_document,
        "Serving bundle"
    );

    let request = match rewrite_path(request, &target.path) {
        Ok(request) => request,
        Err(e) => return e.into_response(),
    };

    let dir = state.config.bundle_path(&target.bundle);
    let index = dir.join("index.html");

    match ServeDir::new(&dir)
        .fallback(ServeFile::new(index))
        .oneshot(request)
        .await
    {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// Top-level page load, as opposed to an iframe, script or fetch.
///
/// Uses `Sec-Fetch-Dest` when the client sends it. Without it, a request
/// accepting HTML is taken as a page load.
pub fn is_document_request(headers: &HeaderMap) -> bool {
    if let Some(dest) = headers.get("sec-fetch-dest") {
        return dest.to_str().map_or(false, |v| v == "document");
    }

    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |accept| accept.contains("text/html"))
}

fn rewrite_path(request: Request, path: &str) -> Result<Request, ApiError> {
    let (mut parts, body) = request.into_parts();

    let path_and_query = match parts.uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };
    parts.uri = Uri::builder()
        .path_and_query(path_and_query)
        .build()
        .map_err(|e| ApiError::Internal(format!("Invalid bundle path: {}", e)))?;

    Ok(Request::from_parts(parts, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(bundle: &str, path: &str) -> BundleTarget {
        BundleTarget {
            bundle: bundle.to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_document_navigation_to_host_route_gets_shell() {
        let table = RouteTable::standard();
        assert_eq!(select_bundle(&table, "/", true), target("shell", "/"));
        assert_eq!(
            select_bundle(&table, "/novatrace/status", true),
            target("shell", "/novatrace/status")
        );
    }

    #[test]
    fn test_frame_loads_get_bundle() {
        let table = RouteTable::standard();
        assert_eq!(
            select_bundle(&table, "/novatrace/status", false),
            target("novatrace", "/status")
        );
        assert_eq!(select_bundle(&table, "/novatrace/", false), target("novatrace", "/"));
        assert_eq!(select_bundle(&table, "/novatrace", false), target("novatrace", "/"));
        assert_eq!(
            select_bundle(&table, "/home/home-1a2b.js", false),
            target("home", "/home-1a2b.js")
        );
    }

    #[test]
    fn test_standalone_bundle_document() {
        // /home/ is not a shell route, so a direct visit opens the bundle standalone
        let table = RouteTable::standard();
        assert_eq!(select_bundle(&table, "/home/", true), target("home", "/"));
    }

    #[test]
    fn test_document_detection() {
        let mut headers = HeaderMap::new();
        assert!(!is_document_request(&headers));

        headers.insert(header::ACCEPT, "text/html,application/xhtml+xml".parse().unwrap());
        assert!(is_document_request(&headers));

        // the fetch-metadata header wins over Accept
        headers.insert("sec-fetch-dest", "iframe".parse().unwrap());
        assert!(!is_document_request(&headers));

        headers.insert("sec-fetch-dest", "document".parse().unwrap());
        assert!(is_document_request(&headers));

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, "*/*".parse().unwrap());
        assert!(!is_document_request(&headers));
    }

    #[test]
    fn test_everything_else_gets_shell() {
        let table = RouteTable::standard();
        assert_eq!(
            select_bundle(&table, "/shell-9f8e.wasm", false),
            target("shell", "/shell-9f8e.wasm")
        );
        assert_eq!(select_bundle(&table, "/homepage", false), target("shell", "/homepage"));
    }
}
