//! Route Table
//!
//! Static mapping from host path prefixes to microfrontends and the URLs
//! their iframes load in each environment.
//!
//! # Matching
//!
//! ```text
//! host path            microfrontend   sub-path   production           development
//! /                    home            /          /home/               http://localhost:5173/
//! /novatrace           novatrace       /          /novatrace/          http://localhost:5174/
//! /novatrace/status    novatrace       /status    /novatrace/status    http://localhost:5174/status
//! /novatrace/events    novatrace       /events    /novatrace/events    http://localhost:5174/events
//! /novatrace/other     novatrace       /          /novatrace/          http://localhost:5174/
//! ```
//!
//! The root prefix `/` only matches `/` itself. Every other prefix matches on
//! segment boundaries, and the longest matching prefix wins.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::environment::Environment;
use super::error::{FrameError, FrameResult};
use super::origin::Origin;

/// Sub-path that selects a microfrontend's root view
pub const ROOT_SUB_PATH: &str = "/";

/// One independently built microfrontend bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Microfrontend {
    /// Identifier, also the bundle directory name
    pub id: String,
    /// Human readable name for navigation
    #[serde(default)]
    pub title: String,
    /// Host path prefix the shell mounts this microfrontend under
    pub host_prefix: String,
    /// Dev server origin (fixed port per microfrontend)
    pub dev_origin: Origin,
    /// Origin-relative base path of the production bundle
    pub prod_base: String,
    /// Internal routes, `/` always included
    #[serde(default = "default_sub_paths")]
    pub sub_paths: Vec<String>,
}

fn default_sub_paths() -> Vec<String> {
    vec![ROOT_SUB_PATH.to_string()]
}

impl Microfrontend {
    /// Create a microfrontend exposing only its root view
    pub fn new(
        id: impl Into<String>,
        host_prefix: impl Into<String>,
        dev_origin: Origin,
        prod_base: impl Into<String>,
    ) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            host_prefix: host_prefix.into(),
            dev_origin,
            prod_base: prod_base.into(),
            sub_paths: default_sub_paths(),
        }
    }

    /// Set the display title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Register an internal route such as `/status`
    pub fn sub_path(mut self, sub_path: impl Into<String>) -> Self {
        self.sub_paths.push(sub_path.into());
        self
    }

    /// Whether `host_path` falls under this microfrontend's prefix
    pub fn matches(&self, host_path: &str) -> bool {
        if self.host_prefix == ROOT_SUB_PATH {
            return host_path == ROOT_SUB_PATH;
        }
        extends_on_segment(host_path, &self.host_prefix)
    }

    /// Pick the internal route for a host path under this microfrontend.
    ///
    /// Returns the longest non-root sub-path the host path reaches, else `/`.
    pub fn select_sub_path(&self, host_path: &str) -> &str {
        let rest = if self.host_prefix == ROOT_SUB_PATH {
            host_path
        } else {
            host_path.strip_prefix(self.host_prefix.as_str()).unwrap_or("")
        };

        self.longest_sub_path(rest)
    }

    /// Internal route for a path as seen inside the frame itself
    /// (`/novatrace/events` in production, `/events` on the dev server).
    pub fn sub_path_for_frame(&self, frame_path: &str, environment: Environment) -> &str {
        let frame_path = normalize_host_path(frame_path);
        let rest = match environment {
            Environment::Production => frame_path
                .strip_prefix(self.prod_base.trim_end_matches('/'))
                .unwrap_or(frame_path),
            Environment::Development => frame_path,
        };

        self.longest_sub_path(rest)
    }

    fn longest_sub_path(&self, rest: &str) -> &str {
        self.sub_paths
            .iter()
            .filter(|sub| sub.as_str() != ROOT_SUB_PATH)
            .filter(|sub| extends_on_segment(rest, sub))
            .max_by_key(|sub| sub.len())
            .map(String::as_str)
            .unwrap_or(ROOT_SUB_PATH)
    }

    /// Frame URL for an already selected sub-path
    pub fn frame_url(&self, sub_path: &str, environment: Environment) -> String {
        match environment {
            Environment::Production => {
                format!("{}{}", self.prod_base.trim_end_matches('/'), sub_path)
            }
            Environment::Development => format!("{}{}", self.dev_origin, sub_path),
        }
    }

    /// Host path that shows `sub_path` of this microfrontend in the shell
    pub fn host_path(&self, sub_path: &str) -> String {
        if self.host_prefix == ROOT_SUB_PATH {
            return sub_path.to_string();
        }
        if sub_path == ROOT_SUB_PATH {
            return self.host_prefix.clone();
        }
        format!("{}{}", self.host_prefix, sub_path)
    }

    fn validate(&self) -> FrameResult<()> {
        let invalid = |msg: String| Err(FrameError::InvalidRouteTable(msg));

        if self.id.trim().is_empty() {
            return invalid("microfrontend id must not be empty".to_string());
        }
        if !is_host_relative(&self.host_prefix) {
            return invalid(format!(
                "host prefix '{}' of '{}' must start with '/'",
                self.host_prefix, self.id
            ));
        }
        if self.host_prefix != ROOT_SUB_PATH && self.host_prefix.ends_with('/') {
            return invalid(format!(
                "host prefix '{}' of '{}' must not end with '/'",
                self.host_prefix, self.id
            ));
        }
        if !is_host_relative(&self.prod_base)
            || self.prod_base.starts_with("//")
            || self.prod_base.trim_end_matches('/').is_empty()
        {
            return invalid(format!(
                "production base '{}' of '{}' must be origin-relative",
                self.prod_base, self.id
            ));
        }
        if !self.sub_paths.iter().any(|s| s == ROOT_SUB_PATH) {
            return invalid(format!("'{}' has no root sub-path", self.id));
        }
        let mut seen = HashSet::new();
        for sub in &self.sub_paths {
            if !is_host_relative(sub) {
                return invalid(format!(
                    "sub-path '{}' of '{}' must start with '/'",
                    sub, self.id
                ));
            }
            // Host paths are matched with trailing slashes stripped
            if sub != ROOT_SUB_PATH && sub.ends_with('/') {
                return invalid(format!(
                    "sub-path '{}' of '{}' must not end with '/'",
                    sub, self.id
                ));
            }
            if !seen.insert(sub.as_str()) {
                return invalid(format!("duplicate sub-path '{}' in '{}'", sub, self.id));
            }
        }
        Ok(())
    }
}

/// A matched route: which microfrontend and which of its internal routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry<'a> {
    pub microfrontend: &'a Microfrontend,
    pub sub_path: &'a str,
}

/// Validated set of microfrontends
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTable {
    entries: Vec<Microfrontend>,
}

impl RouteTable {
    /// Build and validate a route table
    pub fn new(entries: Vec<Microfrontend>) -> FrameResult<Self> {
        if entries.is_empty() {
            return Err(FrameError::InvalidRouteTable(
                "at least one microfrontend is required".to_string(),
            ));
        }

        let mut ids = HashSet::new();
        let mut prefixes = HashSet::new();
        for entry in &entries {
            entry.validate()?;
            if !ids.insert(entry.id.as_str()) {
                return Err(FrameError::InvalidRouteTable(format!(
                    "duplicate microfrontend id '{}'",
                    entry.id
                )));
            }
            if !prefixes.insert(entry.host_prefix.as_str()) {
                return Err(FrameError::InvalidRouteTable(format!(
                    "duplicate host prefix '{}'",
                    entry.host_prefix
                )));
            }
        }

        Ok(Self { entries })
    }

    /// The shipped table: home at `/`, NovaTrace at `/novatrace`
    pub fn standard() -> Self {
        let home = Microfrontend::new(
            "home",
            "/",
            Origin::localhost(5173),
            "/home",
        )
        .title("Home");

        let novatrace = Microfrontend::new(
            "novatrace",
            "/novatrace",
            Origin::localhost(5174),
            "/novatrace",
        )
        .title("NovaTrace")
        .sub_path("/status")
        .sub_path("/events");

        Self {
            entries: vec![home, novatrace],
        }
    }

    pub fn entries(&self) -> &[Microfrontend] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&Microfrontend> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Find the microfrontend and internal route for a host path
    pub fn lookup(&self, host_path: &str) -> Option<RouteEntry<'_>> {
        let host_path = normalize_host_path(host_path);

        let microfrontend = self
            .entries
            .iter()
            .filter(|e| e.matches(host_path))
            .max_by_key(|e| e.host_prefix.len())?;

        Some(RouteEntry {
            microfrontend,
            sub_path: microfrontend.select_sub_path(host_path),
        })
    }

    /// Compute the iframe `src` for a host path.
    ///
    /// Pure: the same arguments always produce the same URL. Production URLs
    /// are origin-relative; development URLs point at the dev server.
    pub fn resolve_frame_url(&self, host_path: &str, environment: Environment) -> Option<String> {
        self.lookup(host_path)
            .map(|route| route.microfrontend.frame_url(route.sub_path, environment))
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn is_host_relative(path: &str) -> bool {
    path.starts_with('/')
}

/// Drop query, fragment and trailing slashes: `/novatrace/status/?x=1` → `/novatrace/status`
fn normalize_host_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        ROOT_SUB_PATH
    } else {
        trimmed
    }
}

/// `path` equals `prefix` or continues it with a new segment
fn extends_on_segment(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
