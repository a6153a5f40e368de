//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::frame::{Environment, FrameError, Microfrontend, Origin, OriginPolicy, RouteTable};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub shell: ShellConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Replaces the standard route table when non-empty
    #[serde(default)]
    pub microfrontends: Vec<Microfrontend>,
}

/// Shell server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ShellConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub environment: Environment,

    /// Origin browsers use to reach the shell. Defaults to
    /// `http://localhost:<port>`.
    #[serde(default)]
    pub public_origin: Option<String>,

    /// Directory holding one built bundle per microfrontend id plus `shell/`
    #[serde(default = "default_bundle_dir")]
    pub bundle_dir: String,

    /// Additional origins allowed to post navigation messages
    #[serde(default)]
    pub extra_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_bundle_dir() -> String {
    "./dist".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            public_origin: None,
            bundle_dir: default_bundle_dir(),
            extra_origins: Vec::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ShellConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The shell's public origin
    pub fn origin(&self) -> Result<Origin, ConfigError> {
        let raw = self
            .public_origin
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port));
        Ok(Origin::parse(&raw)?)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        let mut report = LoadReport::default();
        config.apply_env_overrides(&mut report);
        report.log();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let (config, report) = Self::load_reported(Some(path))?;
        report.log();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let (config, report) = Self::search(&default_config_paths());
        report.log();
        config
    }

    /// Load without logging: `path`, or the default locations when `None`.
    ///
    /// For callers that install their subscriber from the loaded config and
    /// log the report afterwards.
    pub fn load_reported(path: Option<&Path>) -> Result<(Self, LoadReport), ConfigError> {
        match path {
            Some(path) => {
                let mut config = Self::load(path)?;
                let mut report = LoadReport {
                    loaded_from: Some(path.to_path_buf()),
                    ..LoadReport::default()
                };
                config.apply_env_overrides(&mut report);
                Ok((config, report))
            }
            None => Ok(Self::search(&default_config_paths())),
        }
    }

    /// First candidate that exists and parses, else defaults
    fn search(candidates: &[PathBuf]) -> (Self, LoadReport) {
        let mut report = LoadReport::default();

        let mut config = candidates
            .iter()
            .filter(|path| path.exists())
            .find_map(|path| match Self::load(path) {
                Ok(config) => {
                    report.loaded_from = Some(path.clone());
                    Some(config)
                }
                Err(e) => {
                    report.skipped.push((path.clone(), e));
                    None
                }
            })
            .unwrap_or_default();

        config.apply_env_overrides(&mut report);
        (config, report)
    }

    /// The configured route table, or the standard one
    pub fn route_table(&self) -> Result<RouteTable, ConfigError> {
        if self.microfrontends.is_empty() {
            return Ok(RouteTable::standard());
        }
        Ok(RouteTable::new(self.microfrontends.clone())?)
    }

    /// Origins the shell accepts navigation messages from
    pub fn origin_policy(&self, table: &RouteTable) -> Result<OriginPolicy, ConfigError> {
        let mut policy = OriginPolicy::for_table(table, self.shell.environment, &self.shell.origin()?);
        for raw in &self.shell.extra_origins {
            policy = policy.allow(Origin::parse(raw)?);
        }
        Ok(policy)
    }

    /// Check everything that can be checked without starting the server
    pub fn validate(&self) -> Result<(), ConfigError> {
        let table = self.route_table()?;
        self.origin_policy(&table)?;
        Ok(())
    }

    fn apply_env_overrides(&mut self, report: &mut LoadReport) {
        if let Ok(env) = std::env::var("NOVATRACE_ENV") {
            match env.parse() {
                Ok(env) => self.shell.environment = env,
                Err(e) => report.ignored.push(format!("NOVATRACE_ENV: {}", e)),
            }
        }

        if let Ok(host) = std::env::var("NOVATRACE_HOST") {
            self.shell.host = host;
        }
        if let Ok(port) = std::env::var("NOVATRACE_PORT") {
            match port.parse() {
                Ok(p) => self.shell.port = p,
                Err(_) => report.ignored.push(format!("NOVATRACE_PORT: '{}' is not a port", port)),
            }
        }
        if let Ok(origin) = std::env::var("NOVATRACE_PUBLIC_ORIGIN") {
            self.shell.public_origin = Some(origin);
        }
        if let Ok(dir) = std::env::var("NOVATRACE_BUNDLE_DIR") {
            self.shell.bundle_dir = dir;
        }

        if let Ok(level) = std::env::var("NOVATRACE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("NOVATRACE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// What happened while loading, for logging once tracing is up
#[derive(Debug, Default)]
pub struct LoadReport {
    /// File the config came from; `None` means built-in defaults
    pub loaded_from: Option<PathBuf>,
    /// Candidate files that exist but failed to load
    pub skipped: Vec<(PathBuf, ConfigError)>,
    /// Environment overrides that were ignored
    pub ignored: Vec<String>,
}

impl LoadReport {
    pub fn log(&self) {
        for (path, e) in &self.skipped {
            tracing::warn!("Failed to load config from {:?}: {}", path, e);
        }
        for ignored in &self.ignored {
            tracing::warn!("Ignoring {}", ignored);
        }
        match &self.loaded_from {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

fn default_config_paths() -> Vec<PathBuf> {
    [
        dirs::config_dir().map(|p| p.join("novatrace").join("config.toml")),
        Some(PathBuf::from("/etc/novatrace/config.toml")),
        Some(PathBuf::from("./config.toml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] FrameError),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# NovaTrace Shell Configuration
#
# Environment variables override these settings:
# - NOVATRACE_ENV            (production | development)
# - NOVATRACE_HOST
# - NOVATRACE_PORT
# - NOVATRACE_PUBLIC_ORIGIN
# - NOVATRACE_BUNDLE_DIR
# - NOVATRACE_LOG_LEVEL
# - NOVATRACE_LOG_FORMAT

[shell]
# Bind address
host = "0.0.0.0"
port = 8090

# production: frames load from origin-relative bundle paths on this server
# development: frames load from each microfrontend's localhost dev server
environment = "development"

# Origin browsers use to reach the shell (defaults to http://localhost:<port>)
# public_origin = "https://novatrace.example.org"

# Built bundles: <bundle_dir>/shell, <bundle_dir>/home, <bundle_dir>/novatrace
bundle_dir = "./dist"

# Extra origins allowed to post navigation messages
extra_origins = []

request_timeout_secs = 30

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Route table. Omit to use the built-in home + novatrace table.
[[microfrontends]]
id = "home"
title = "Home"
host_prefix = "/"
dev_origin = "http://localhost:5173"
prod_base = "/home"
sub_paths = ["/"]

[[microfrontends]]
id = "novatrace"
title = "NovaTrace"
host_prefix = "/novatrace"
dev_origin = "http://localhost:5174"
prod_base = "/novatrace"
sub_paths = ["/", "/status", "/events"]
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_parses_to_standard_table() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.shell.port, 8090);
        assert_eq!(config.shell.environment, Environment::Development);
        assert_eq!(config.route_table().unwrap(), RouteTable::standard());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.shell.bundle_dir, "./dist");
        assert_eq!(config.route_table().unwrap(), RouteTable::standard());
        assert_eq!(
            config.shell.origin().unwrap().as_str(),
            "http://localhost:8090"
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[shell]
port = 9000
environment = "production"
public_origin = "https://novatrace.example.org"
extra_origins = ["https://status.example.org"]

[logging]
format = "json"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.shell.port, 9000);
        assert_eq!(config.shell.environment, Environment::Production);
        assert!(config.logging.is_json());

        let table = config.route_table().unwrap();
        let policy = config.origin_policy(&table).unwrap();
        assert!(policy.allows("https://novatrace.example.org"));
        assert!(policy.allows("https://status.example.org"));
        assert!(!policy.allows("http://localhost:5174"));
    }

    #[test]
    fn test_invalid_route_table_rejected() {
        let config: Config = toml::from_str(
            r#"
[[microfrontends]]
id = "lab"
host_prefix = "lab"
dev_origin = "http://localhost:5175"
prod_base = "/lab"
"#,
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_invalid_dev_origin_is_parse_error() {
        let result: Result<Config, _> = toml::from_str(
            r#"
[[microfrontends]]
id = "lab"
host_prefix = "/lab"
dev_origin = "localhost:5175"
prod_base = "/lab"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_search_reports_skipped_files() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("config.toml");
        std::fs::write(&broken, "[shell\nport = ").unwrap();
        std::fs::write(&good, "[shell]\nport = 9100\n").unwrap();

        let candidates = vec![dir.path().join("absent.toml"), broken.clone(), good.clone()];
        let (config, report) = Config::search(&candidates);

        assert_eq!(config.shell.port, 9100);
        assert_eq!(report.loaded_from, Some(good));
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, broken);
        assert!(matches!(report.skipped[0].1, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_search_without_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, report) = Config::search(&[dir.path().join("absent.toml")]);
        assert!(report.loaded_from.is_none());
        assert!(report.skipped.is_empty());
        assert_eq!(config.route_table().unwrap(), RouteTable::standard());
    }

    #[test]
    fn test_missing_file() {
        let result = Config::load(Path::new("/nonexistent/novatrace.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
