//! Cross-frame message types
//!
//! The only wire contract between an embedded microfrontend and the shell:
//!
//! ```json
//! {"type": "navigate", "path": "/novatrace/events"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{FrameError, FrameResult};

/// Messages an embedded frame posts to its parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FrameMessage {
    /// Ask the shell to navigate to a host path
    Navigate {
        /// Host-relative route, always starting with `/`
        path: String,
    },
}

impl FrameMessage {
    /// Build a navigation message, rejecting paths that are not host-relative
    pub fn navigate(path: impl Into<String>) -> FrameResult<Self> {
        let path = path.into();
        if !is_navigable(&path) {
            return Err(FrameError::InvalidPath(path));
        }
        Ok(FrameMessage::Navigate { path })
    }

    /// Extract a navigation path from an arbitrary message payload.
    ///
    /// Returns `None` for anything that is not a well-formed navigate message:
    /// other `type` values, missing or non-string `path`, empty or relative
    /// paths. Browser extensions and other frames post unrelated data on the
    /// same channel, so this never fails loudly.
    pub fn navigation_path(data: &Value) -> Option<&str> {
        let object = data.as_object()?;
        if object.get("type")?.as_str()? != "navigate" {
            return None;
        }
        let path = object.get("path")?.as_str()?;
        is_navigable(path).then_some(path)
    }

    pub fn to_json(&self) -> FrameResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A `message` event as the shell sees it
#[derive(Debug, Clone, PartialEq)]
pub struct MessageEvent {
    /// Origin of the sending window, e.g. `http://localhost:5174`
    pub origin: String,
    /// Structured-clone payload, converted to JSON
    pub data: Value,
}

impl MessageEvent {
    pub fn new(origin: impl Into<String>, data: Value) -> Self {
        Self {
            origin: origin.into(),
            data,
        }
    }
}

fn is_navigable(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_navigate() {
        let msg = FrameMessage::navigate("/novatrace/events").unwrap();
        assert_eq!(
            msg.to_json().unwrap(),
            r#"{"type":"navigate","path":"/novatrace/events"}"#
        );
    }

    #[test]
    fn test_navigate_rejects_relative_paths() {
        assert!(matches!(
            FrameMessage::navigate("novatrace"),
            Err(FrameError::InvalidPath(_))
        ));
        assert!(FrameMessage::navigate("").is_err());
        assert!(FrameMessage::navigate("//evil.example.com").is_err());
    }

    #[test]
    fn test_navigation_path_accepts_navigate() {
        let data = json!({"type": "navigate", "path": "/novatrace/status"});
        assert_eq!(FrameMessage::navigation_path(&data), Some("/novatrace/status"));
    }

    #[test]
    fn test_navigation_path_ignores_other_messages() {
        let ignored = [
            json!(null),
            json!("navigate"),
            json!(42),
            json!([]),
            json!({}),
            json!({"type": "resize", "height": 400}),
            json!({"type": "navigate"}),
            json!({"type": "navigate", "path": 7}),
            json!({"type": "navigate", "path": ""}),
            json!({"type": "navigate", "path": "status"}),
            json!({"type": "NAVIGATE", "path": "/status"}),
            json!({"source": "react-devtools-content-script", "payload": {}}),
        ];
        for data in ignored {
            assert_eq!(FrameMessage::navigation_path(&data), None, "{}", data);
        }
    }

    #[test]
    fn test_deserialize_round_trip() {
        let msg: FrameMessage =
            serde_json::from_str(r#"{"type": "navigate", "path": "/novatrace"}"#).unwrap();
        assert_eq!(
            msg,
            FrameMessage::Navigate {
                path: "/novatrace".to_string()
            }
        );
    }
}
