//! Frame contract error types
//!
//! Errors raised while building route tables, validating origins and
//! posting navigation messages. Malformed incoming messages are never
//! errors; the relay drops them.

use thiserror::Error;

/// Errors that can occur in the frame contract
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Navigation path is empty or not host-relative
    #[error("Invalid path '{0}': must start with '/'")]
    InvalidPath(String),

    /// Origin is not of the form scheme://host[:port]
    #[error("Invalid origin '{0}'")]
    InvalidOrigin(String),

    /// Wildcard target origins are never used for posting
    #[error("Wildcard target origin is not allowed")]
    WildcardTarget,

    /// Route table entry failed validation
    #[error("Invalid route table: {0}")]
    InvalidRouteTable(String),

    /// Unknown environment name
    #[error("Unknown environment '{0}' (expected 'production' or 'development')")]
    UnknownEnvironment(String),

    /// Message could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The window refused the postMessage call
    #[error("Failed to post message to parent: {0}")]
    PostFailed(String),
}

impl From<serde_json::Error> for FrameError {
    fn from(err: serde_json::Error) -> Self {
        FrameError::Serialization(err.to_string())
    }
}

/// Result type for frame contract operations
pub type FrameResult<T> = Result<T, FrameError>;
