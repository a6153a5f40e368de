//! Host Frame Resolver
//!
//! Shell-side half of the contract: computes iframe sources for host paths
//! and relays navigation messages coming back out of the frames.

use std::sync::Arc;

use super::environment::Environment;
use super::origin::{Origin, OriginPolicy};
use super::relay::{self, MessageSource, Subscription};
use super::routes::{RouteEntry, RouteTable};

/// Resolve against the standard route table.
///
/// ```
/// use novatrace::frame::{resolve_frame_url, Environment};
///
/// assert_eq!(
///     resolve_frame_url("/novatrace/status", Environment::Development).as_deref(),
///     Some("http://localhost:5174/status")
/// );
/// ```
pub fn resolve_frame_url(host_path: &str, environment: Environment) -> Option<String> {
    RouteTable::standard().resolve_frame_url(host_path, environment)
}

/// Route table bound to the environment chosen at start-up
#[derive(Debug, Clone)]
pub struct HostFrameResolver {
    table: Arc<RouteTable>,
    environment: Environment,
}

impl HostFrameResolver {
    pub fn new(table: RouteTable, environment: Environment) -> Self {
        Self::shared(Arc::new(table), environment)
    }

    pub fn shared(table: Arc<RouteTable>, environment: Environment) -> Self {
        Self { table, environment }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn lookup(&self, host_path: &str) -> Option<RouteEntry<'_>> {
        self.table.lookup(host_path)
    }

    /// iframe `src` for `host_path`, or `None` when no microfrontend matches
    pub fn resolve_frame_url(&self, host_path: &str) -> Option<String> {
        self.table.resolve_frame_url(host_path, self.environment)
    }

    /// Origins allowed to send navigation messages to a shell at `shell_origin`
    pub fn origin_policy(&self, shell_origin: &Origin) -> OriginPolicy {
        OriginPolicy::for_table(&self.table, self.environment, shell_origin)
    }

    /// Listen for navigation messages on `source`; see [`relay::attach`]
    pub fn attach<S, F>(&self, source: &S, policy: OriginPolicy, on_navigate: F) -> Subscription
    where
        S: MessageSource + Clone + 'static,
        F: FnMut(String) + 'static,
    {
        relay::attach(source, policy, on_navigate)
    }
}
