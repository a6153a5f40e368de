//! # NovaTrace
//!
//! Microfrontend shell for the NovaTrace astronomical-alert dashboards.
//!
//! Each dashboard (home, NovaTrace alerts) is an independently built
//! single-page bundle. The shell mounts one of them per host route inside an
//! iframe and follows navigation requests the frames post back to it.
//!
//! ## Modules
//!
//! - [`frame`]: route table, frame URL resolution and the cross-frame
//!   navigation contract (no async runtime, builds for WASM)
//! - [`records`]: read-only alert and event records
//! - [`config`]: TOML configuration with environment overrides (`server` feature)
//! - [`api`]: shell HTTP server with Axum (`server` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use novatrace::frame::{Environment, HostFrameResolver, RouteTable};
//!
//! let resolver = HostFrameResolver::new(RouteTable::standard(), Environment::Production);
//!
//! assert_eq!(resolver.resolve_frame_url("/novatrace/status").as_deref(), Some("/novatrace/status"));
//! assert_eq!(resolver.resolve_frame_url("/novatrace").as_deref(), Some("/novatrace/"));
//! assert_eq!(resolver.resolve_frame_url("/nowhere"), None);
//! ```

pub mod frame;
pub mod records;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod config;

// Re-export top-level types for convenience
pub use frame::{
    attach, resolve_frame_url, Emitted, Environment, FrameError, FrameMessage, FrameResult,
    FrameWindow, HostFrameResolver, MessageEvent, MessageSource, MessageTarget, Microfrontend,
    NavigationBridge, Origin, OriginPolicy, RouteMatch, RouteTable, ShellRouter, ShellView,
    Subscription, TargetOrigin, Transition,
};

pub use records::{Alert, AlertFilter, BrokerState, BrokerStatus, Event};

#[cfg(feature = "server")]
pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

#[cfg(feature = "server")]
pub use config::{generate_default_config, Config, ConfigError, LoadReport, LoggingConfig, ShellConfig};
