//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::config::{Config, ConfigError};
use crate::frame::{Environment, HostFrameResolver, OriginPolicy, RouteTable};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Route table bound to the configured environment
    pub resolver: HostFrameResolver,
    /// Origins frames may post navigation messages from
    pub origins: Arc<OriginPolicy>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(resolver: HostFrameResolver, origins: OriginPolicy, config: ApiConfig) -> Self {
        Self {
            resolver,
            origins: Arc::new(origins),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Build state from a loaded configuration file
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let table = config.route_table()?;
        let origins = config.origin_policy(&table)?;
        let resolver = HostFrameResolver::new(table, config.shell.environment);

        Ok(Self::new(resolver, origins, ApiConfig::from_config(config)))
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub fn environment(&self) -> Environment {
        self.resolver.environment()
    }

    pub fn table(&self) -> &RouteTable {
        self.resolver.table()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Root of the built bundles
    pub bundle_dir: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8090,
            request_timeout_ms: 30_000,
            bundle_dir: PathBuf::from("./dist"),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            host: config.shell.host.clone(),
            port: config.shell.port,
            request_timeout_ms: config.shell.request_timeout_secs * 1000,
            bundle_dir: PathBuf::from(&config.shell.bundle_dir),
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Directory of one microfrontend's (or the shell's) bundle
    pub fn bundle_path(&self, id: &str) -> PathBuf {
        self.bundle_dir.join(id)
    }
}
