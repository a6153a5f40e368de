//! Navigation bridge
//!
//! Runs inside an embedded microfrontend. Instead of touching the shell's
//! router it posts a [`FrameMessage::Navigate`] to the parent window.

use super::error::{FrameError, FrameResult};
use super::message::FrameMessage;
use super::origin::Origin;

/// The parts of a browser window the bridge needs
pub trait FrameWindow {
    /// True when the window has no parent frame (parent is itself)
    fn is_top_level(&self) -> bool;

    /// The window's own origin
    fn origin(&self) -> FrameResult<Origin>;

    /// `window.parent.postMessage(JSON.parse(message), target_origin)`
    fn post_to_parent(&self, message: &str, target_origin: &Origin) -> FrameResult<()>;
}

/// What happened to a navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    /// Message posted to the parent frame
    Posted { target_origin: Origin },
    /// Running outside the shell; nothing to notify
    Standalone,
}

/// Where navigation messages are sent
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TargetOrigin {
    /// The frame's own origin (shell and frame served together)
    #[default]
    SameOrigin,
    /// An explicit shell origin (dev servers on different ports)
    Explicit(Origin),
}

impl TargetOrigin {
    /// Parse a configured target. `*` is refused.
    pub fn parse(raw: &str) -> FrameResult<Self> {
        if raw.trim() == "*" {
            return Err(FrameError::WildcardTarget);
        }
        Origin::parse(raw).map(TargetOrigin::Explicit)
    }
}

/// Reports in-frame navigation to the hosting shell
#[derive(Debug, Clone)]
pub struct NavigationBridge<W> {
    window: W,
    target: TargetOrigin,
}

impl<W: FrameWindow> NavigationBridge<W> {
    pub fn new(window: W) -> Self {
        Self {
            window,
            target: TargetOrigin::SameOrigin,
        }
    }

    pub fn with_target(mut self, target: TargetOrigin) -> Self {
        self.target = target;
        self
    }

    /// True when there is a parent frame to notify
    pub fn is_embedded(&self) -> bool {
        !self.window.is_top_level()
    }

    /// Post `{type: "navigate", path}` to the parent window.
    ///
    /// `path` must start with `/`. When the frame runs standalone nothing is
    /// sent and `Emitted::Standalone` is returned.
    pub fn emit_navigate(&self, path: &str) -> FrameResult<Emitted> {
        let message = FrameMessage::navigate(path)?;

        if self.window.is_top_level() {
            tracing::debug!(path = %path, "Standalone frame, navigation not relayed");
            return Ok(Emitted::Standalone);
        }

        let target_origin = match &self.target {
            TargetOrigin::SameOrigin => self.window.origin()?,
            TargetOrigin::Explicit(origin) => origin.clone(),
        };

        self.window
            .post_to_parent(&message.to_json()?, &target_origin)?;

        tracing::debug!(path = %path, target = %target_origin, "Posted navigation to parent");
        Ok(Emitted::Posted { target_origin })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeWindow {
        top_level: bool,
        origin: &'static str,
        posted: RefCell<Vec<(String, String)>>,
    }

    impl FakeWindow {
        fn embedded() -> Self {
            Self {
                top_level: false,
                origin: "http://localhost:5174",
                posted: RefCell::new(Vec::new()),
            }
        }

        fn standalone() -> Self {
            Self {
                top_level: true,
                ..Self::embedded()
            }
        }
    }

    impl FrameWindow for &FakeWindow {
        fn is_top_level(&self) -> bool {
            self.top_level
        }

        fn origin(&self) -> FrameResult<Origin> {
            Origin::parse(self.origin)
        }

        fn post_to_parent(&self, message: &str, target_origin: &Origin) -> FrameResult<()> {
            self.posted
                .borrow_mut()
                .push((message.to_string(), target_origin.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_embedded_posts_exactly_one_message() {
        let window = FakeWindow::embedded();
        let bridge = NavigationBridge::new(&window);

        let emitted = bridge.emit_navigate("/novatrace/events").unwrap();

        assert!(matches!(emitted, Emitted::Posted { .. }));
        let posted = window.posted.borrow();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].0, r#"{"type":"navigate","path":"/novatrace/events"}"#);
        assert_eq!(posted[0].1, "http://localhost:5174");
    }

    #[test]
    fn test_standalone_is_noop() {
        let window = FakeWindow::standalone();
        let bridge = NavigationBridge::new(&window);

        assert!(!bridge.is_embedded());
        assert_eq!(bridge.emit_navigate("/novatrace/events"), Ok(Emitted::Standalone));
        assert!(window.posted.borrow().is_empty());
    }

    #[test]
    fn test_explicit_target_origin() {
        let window = FakeWindow::embedded();
        let target = TargetOrigin::parse("http://localhost:8090").unwrap();
        let bridge = NavigationBridge::new(&window).with_target(target);

        let emitted = bridge.emit_navigate("/novatrace/status").unwrap();

        assert_eq!(
            emitted,
            Emitted::Posted {
                target_origin: Origin::parse("http://localhost:8090").unwrap()
            }
        );
        assert_eq!(window.posted.borrow()[0].1, "http://localhost:8090");
    }

    #[test]
    fn test_wildcard_target_rejected() {
        assert_eq!(TargetOrigin::parse("*"), Err(FrameError::WildcardTarget));
    }

    #[test]
    fn test_invalid_path_posts_nothing() {
        let window = FakeWindow::embedded();
        let bridge = NavigationBridge::new(&window);

        assert!(matches!(
            bridge.emit_navigate("events"),
            Err(FrameError::InvalidPath(_))
        ));
        assert!(window.posted.borrow().is_empty());
    }
}
