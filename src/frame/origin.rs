//! Message origins
//!
//! [`Origin`] is a validated `scheme://host[:port]` string. [`OriginPolicy`]
//! is the allow-list the shell checks incoming navigation messages against.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::environment::Environment;
use super::error::{FrameError, FrameResult};
use super::routes::RouteTable;

/// A web origin: scheme, host and optional port, no path
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Origin(String);

impl Origin {
    /// Parse and normalize an origin. A single trailing `/` is tolerated.
    pub fn parse(raw: &str) -> FrameResult<Self> {
        let trimmed = raw.trim();
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        let invalid = || FrameError::InvalidOrigin(raw.to_string());

        let (scheme, authority) = trimmed.split_once("://").ok_or_else(invalid)?;
        let scheme = scheme.to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(invalid());
        }

        if authority.is_empty()
            || authority.contains(|c: char| matches!(c, '/' | '?' | '#' | '@') || c.is_whitespace())
        {
            return Err(invalid());
        }

        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (authority, None),
        };
        if host.is_empty() {
            return Err(invalid());
        }
        let port = match port {
            Some(port) => Some(port.parse::<u16>().map_err(|_| invalid())?),
            None => None,
        };

        // Browsers report origins without the scheme's default port
        let host = host.to_ascii_lowercase();
        Ok(match (scheme.as_str(), port) {
            ("http", Some(80)) | ("https", Some(443)) | (_, None) => {
                Origin(format!("{}://{}", scheme, host))
            }
            (_, Some(port)) => Origin(format!("{}://{}:{}", scheme, host, port)),
        })
    }

    /// `http://localhost:<port>`, the form every dev server uses
    pub fn localhost(port: u16) -> Self {
        Origin(format!("http://localhost:{}", port))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Port explicitly present in the origin, if any
    pub fn port(&self) -> Option<u16> {
        let authority = self.0.split_once("://").map(|(_, a)| a)?;
        authority.rsplit_once(':').and_then(|(_, p)| p.parse().ok())
    }
}

impl TryFrom<String> for Origin {
    type Error = FrameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Origin::parse(&value)
    }
}

impl From<Origin> for String {
    fn from(origin: Origin) -> Self {
        origin.0
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Origins whose navigation messages the shell acts on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OriginPolicy {
    allowed: BTreeSet<Origin>,
}

impl OriginPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the policy for a shell running in `environment`.
    ///
    /// Production frames are served from the shell's own origin. In
    /// development every microfrontend has its own localhost dev server.
    pub fn for_table(table: &RouteTable, environment: Environment, shell_origin: &Origin) -> Self {
        let mut policy = Self::new().allow(shell_origin.clone());

        if environment == Environment::Development {
            for entry in table.entries() {
                policy = policy.allow(entry.dev_origin.clone());
            }
        }

        policy
    }

    /// Add an origin to the allow-list
    pub fn allow(mut self, origin: Origin) -> Self {
        self.allowed.insert(origin);
        self
    }

    /// Check a raw origin string as reported by a message event
    pub fn allows(&self, raw: &str) -> bool {
        match Origin::parse(raw) {
            Ok(origin) => self.allowed.contains(&origin),
            Err(_) => false,
        }
    }

    pub fn origins(&self) -> impl Iterator<Item = &Origin> {
        self.allowed.iter()
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}
