//! NovaTrace Shell Server
//!
//! Run with: cargo run --bin novatrace
//!
//! # Configuration
//!
//! Loaded from `~/.config/novatrace/config.toml`, `/etc/novatrace/config.toml`
//! or `./config.toml`, or the path in `NOVATRACE_CONFIG`. Environment
//! variables override file values:
//! - `NOVATRACE_ENV`: production or development (default: development)
//! - `NOVATRACE_HOST` / `NOVATRACE_PORT`: bind address (default: 0.0.0.0:8090)
//! - `NOVATRACE_PUBLIC_ORIGIN`: origin browsers use to reach the shell
//! - `NOVATRACE_BUNDLE_DIR`: built bundles (default: ./dist)
//! - `RUST_LOG`: log filter (default: novatrace=info,tower_http=debug)

use anyhow::Context;
use novatrace::api::{serve, AppState};
use novatrace::config::{Config, LoggingConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var("NOVATRACE_CONFIG").ok().map(PathBuf::from);
    let (config, report) = Config::load_reported(config_path.as_deref())
        .with_context(|| format!("loading {:?}", config_path))?;

    // The subscriber depends on the config, so load problems are logged now
    init_tracing(&config.logging);
    report.log();

    tracing::info!("Starting NovaTrace shell v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.shell.environment);
    tracing::info!("Bundle directory: {:?}", config.shell.bundle_dir);

    let state = AppState::from_config(&config).context("invalid route configuration")?;

    for entry in state.table().entries() {
        tracing::info!(
            id = %entry.id,
            host_prefix = %entry.host_prefix,
            src = %entry.frame_url("/", state.environment()),
            "Microfrontend registered"
        );
    }
    tracing::info!(
        "Accepting navigation from: {}",
        state
            .origins
            .origins()
            .map(|o| o.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    serve(state).await?;

    tracing::info!("NovaTrace shell stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("novatrace={},tower_http=debug", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
