//! Deployment environment
//!
//! Resolved once at start-up and passed into the resolver. Nothing in the
//! frame contract reads it from process state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::FrameError;

/// Where the microfrontend bundles are being served from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Bundles live under origin-relative paths on the shell's own origin
    Production,
    /// Each bundle runs its own dev server on a fixed localhost port
    #[default]
    Development,
}

impl Environment {
    /// Parse an optional build-time or env value, falling back to development.
    /// Unknown values fall back too, with a warning.
    pub fn from_option(value: Option<&str>) -> Self {
        match value {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{}, using development", e);
                Environment::Development
            }),
            None => Environment::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Development => "development",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl FromStr for Environment {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" => Ok(Environment::Development),
            other => Err(FrameError::UnknownEnvironment(other.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_environment() {
        assert_eq!("production".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!(" dev ".parse::<Environment>().unwrap(), Environment::Development);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_from_option_defaults_to_development() {
        assert_eq!(Environment::from_option(None), Environment::Development);
        assert_eq!(Environment::from_option(Some("bogus")), Environment::Development);
        assert_eq!(
            Environment::from_option(Some("production")),
            Environment::Production
        );
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Environment::Production).unwrap();
        assert_eq!(json, "\"production\"");
        let env: Environment = serde_json::from_str("\"development\"").unwrap();
        assert_eq!(env, Environment::Development);
    }
}
