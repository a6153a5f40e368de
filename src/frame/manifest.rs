//! Shell manifest
//!
//! The route table, environment and extra trusted origins the shell server
//! runs with, in a form the browser bundles can fetch and rebuild. Bundles
//! that resolved frame URLs from a compiled-in table would drift as soon as
//! the server's config overrides a prefix or production base.

use serde::{Deserialize, Serialize};

use super::environment::Environment;
use super::error::FrameResult;
use super::origin::{Origin, OriginPolicy};
use super::routes::{Microfrontend, RouteTable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellManifest {
    pub environment: Environment,
    pub microfrontends: Vec<Microfrontend>,
    /// Every origin the server trusts for navigation messages
    pub origins: Vec<Origin>,
}

impl ShellManifest {
    pub fn new(table: &RouteTable, environment: Environment, policy: &OriginPolicy) -> Self {
        Self {
            environment,
            microfrontends: table.entries().to_vec(),
            origins: policy.origins().cloned().collect(),
        }
    }

    /// Built-in table with no extra origins, for bundles that cannot reach
    /// a shell server
    pub fn standard(environment: Environment) -> Self {
        Self {
            environment,
            microfrontends: RouteTable::standard().entries().to_vec(),
            origins: Vec::new(),
        }
    }

    /// Rebuild and validate the route table
    pub fn route_table(&self) -> FrameResult<RouteTable> {
        RouteTable::new(self.microfrontends.clone())
    }

    /// Allow-list for a shell page served from `shell_origin`.
    ///
    /// The page's own origin is always trusted even when the server
    /// advertises a different public origin.
    pub fn origin_policy(&self, table: &RouteTable, shell_origin: &Origin) -> OriginPolicy {
        self.origins.iter().cloned().fold(
            OriginPolicy::for_table(table, self.environment, shell_origin),
            OriginPolicy::allow,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameError;

    fn custom_table() -> RouteTable {
        RouteTable::new(vec![
            Microfrontend::new("home", "/", Origin::localhost(5173), "/home"),
            Microfrontend::new("novatrace", "/trace", Origin::localhost(5174), "/nt")
                .sub_path("/status"),
        ])
        .unwrap()
    }

    #[test]
    fn test_manifest_rebuilds_configured_table() {
        let table = custom_table();
        let shell = Origin::parse("https://shell.example.com").unwrap();
        let policy = OriginPolicy::for_table(&table, Environment::Production, &shell);
        let manifest = ShellManifest::new(&table, Environment::Production, &policy);

        let json = serde_json::to_string(&manifest).unwrap();
        let parsed: ShellManifest = serde_json::from_str(&json).unwrap();
        let rebuilt = parsed.route_table().unwrap();

        assert_eq!(rebuilt, table);
        assert_eq!(
            rebuilt.resolve_frame_url("/trace/status", parsed.environment),
            Some("/nt/status".to_string())
        );
        assert_eq!(parsed.origins, vec![shell]);
    }

    #[test]
    fn test_policy_trusts_page_and_advertised_origins() {
        let table = custom_table();
        let manifest = ShellManifest {
            environment: Environment::Production,
            microfrontends: table.entries().to_vec(),
            origins: vec![Origin::parse("https://shell.example.com").unwrap()],
        };

        let page = Origin::parse("http://127.0.0.1:8090").unwrap();
        let policy = manifest.origin_policy(&table, &page);
        assert!(policy.allows("http://127.0.0.1:8090"));
        assert!(policy.allows("https://shell.example.com"));
        assert!(!policy.allows("http://localhost:5174"));
    }

    #[test]
    fn test_invalid_manifest_table_is_rejected() {
        let manifest = ShellManifest {
            environment: Environment::Development,
            microfrontends: Vec::new(),
            origins: Vec::new(),
        };
        assert!(matches!(
            manifest.route_table(),
            Err(FrameError::InvalidRouteTable(_))
        ));
    }
}
