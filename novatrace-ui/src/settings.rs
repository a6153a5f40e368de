//! Build-time settings
//!
//! Bundles are configured when they are built, e.g.
//! `NOVATRACE_ENV=production trunk build novatrace.html`.

use novatrace::frame::{Environment, TargetOrigin};

/// Shell origin during development (the `novatrace` server's default port)
pub const DEFAULT_SHELL_ORIGIN: &str = "http://localhost:8090";

/// Environment baked into this bundle
pub fn environment() -> Environment {
    Environment::from_option(option_env!("NOVATRACE_ENV"))
}

/// Where embedded frames post navigation messages.
///
/// Production frames share the shell's origin. Dev servers run on their own
/// ports, so the shell origin has to be named.
pub fn shell_target() -> TargetOrigin {
    let configured = option_env!("NOVATRACE_SHELL_ORIGIN");
    let raw = match (configured, environment()) {
        (Some(raw), _) => raw,
        (None, Environment::Production) => return TargetOrigin::SameOrigin,
        (None, Environment::Development) => DEFAULT_SHELL_ORIGIN,
    };

    TargetOrigin::parse(raw).unwrap_or_else(|e| {
        web_sys::console::error_1(&format!("Bad shell origin, posting to own origin: {}", e).into());
        TargetOrigin::SameOrigin
    })
}

/// Base URL of the shell server's API as seen from this bundle
pub fn shell_api_base() -> String {
    match shell_target() {
        TargetOrigin::SameOrigin => String::new(),
        TargetOrigin::Explicit(origin) => origin.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_target_never_wildcard() {
        match shell_target() {
            TargetOrigin::SameOrigin => {}
            TargetOrigin::Explicit(origin) => assert_ne!(origin.as_str(), "*"),
        }
    }

    #[test]
    fn test_shell_api_base_has_no_trailing_slash() {
        assert!(!shell_api_base().ends_with('/'));
    }
}
