//! Shell Router
//!
//! Picks the single microfrontend mounted for a host path and tracks the
//! lifecycle of a hosting view:
//!
//! ```text
//! Unmounted ──mount(path)──▶ Mounted(path) ──show(new)──▶ Mounted(new)
//!     ▲                                                     │
//!     └───────────────────────unmount───────────────────────┘
//! ```
//!
//! A mounted view owns exactly one navigation listener. When the computed
//! frame `src` changes the iframe is recreated; state inside the old frame
//! is not carried over.

use serde::Serialize;

use super::origin::OriginPolicy;
use super::relay::{MessageSource, Subscription};
use super::resolver::HostFrameResolver;

/// The frame a host path mounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameTarget {
    pub microfrontend: String,
    pub sub_path: String,
    pub src: String,
}

/// Outcome of routing a host path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteMatch {
    Frame(FrameTarget),
    NotFound,
}

impl RouteMatch {
    pub fn src(&self) -> Option<&str> {
        match self {
            RouteMatch::Frame(target) => Some(&target.src),
            RouteMatch::NotFound => None,
        }
    }
}

/// Maps host paths to mounted frames
#[derive(Debug, Clone)]
pub struct ShellRouter {
    resolver: HostFrameResolver,
}

impl ShellRouter {
    pub fn new(resolver: HostFrameResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &HostFrameResolver {
        &self.resolver
    }

    pub fn route(&self, host_path: &str) -> RouteMatch {
        match self.resolver.lookup(host_path) {
            Some(entry) => RouteMatch::Frame(FrameTarget {
                microfrontend: entry.microfrontend.id.clone(),
                sub_path: entry.sub_path.to_string(),
                src: entry
                    .microfrontend
                    .frame_url(entry.sub_path, self.resolver.environment()),
            }),
            None => RouteMatch::NotFound,
        }
    }
}

/// Lifecycle state of a hosting view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Unmounted,
    Mounted { path: String, route: RouteMatch },
}

/// What the view must do after a path change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Tear down the current iframe (if any) and load `src`
    Reload { src: String },
    /// Same frame source; keep the iframe
    Unchanged,
    /// Render the not-found view
    NotFound,
    /// The view is not mounted; nothing was done
    NotMounted,
}

/// One shell view hosting one microfrontend frame at a time
#[derive(Debug)]
pub struct ShellView {
    router: ShellRouter,
    state: ViewState,
    subscription: Option<Subscription>,
}

impl ShellView {
    pub fn new(router: ShellRouter) -> Self {
        Self {
            router,
            state: ViewState::Unmounted,
            subscription: None,
        }
    }

    /// Mount at `path` and start relaying navigation from `source`.
    ///
    /// Mounting an already mounted view replaces its listener.
    pub fn mount<S, F>(
        &mut self,
        path: &str,
        source: &S,
        policy: OriginPolicy,
        on_navigate: F,
    ) -> Transition
    where
        S: MessageSource + Clone + 'static,
        F: FnMut(String) + 'static,
    {
        if let Some(previous) = self.subscription.take() {
            previous.detach();
        }
        self.subscription = Some(self.router.resolver().attach(source, policy, on_navigate));

        let route = self.router.route(path);
        let transition = match route.src() {
            Some(src) => Transition::Reload {
                src: src.to_string(),
            },
            None => Transition::NotFound,
        };

        tracing::debug!(path = %path, ?transition, "Shell view mounted");
        self.state = ViewState::Mounted {
            path: path.to_string(),
            route,
        };
        transition
    }

    /// Move a mounted view to `path`
    pub fn show(&mut self, path: &str) -> Transition {
        let ViewState::Mounted { route: current, .. } = &self.state else {
            tracing::warn!(path = %path, "Navigation on unmounted shell view ignored");
            return Transition::NotMounted;
        };

        let next = self.router.route(path);
        let transition = match (current.src(), next.src()) {
            (_, None) => Transition::NotFound,
            (Some(old), Some(new)) if old == new => Transition::Unchanged,
            (_, Some(new)) => Transition::Reload {
                src: new.to_string(),
            },
        };

        tracing::debug!(path = %path, ?transition, "Shell view navigated");
        self.state = ViewState::Mounted {
            path: path.to_string(),
            route: next,
        };
        transition
    }

    /// Detach the listener and return to `Unmounted`
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.detach();
        }
        self.state = ViewState::Unmounted;
        tracing::debug!("Shell view unmounted");
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Current route, `None` while unmounted
    pub fn route(&self) -> Option<&RouteMatch> {
        match &self.state {
            ViewState::Mounted { route, .. } => Some(route),
            ViewState::Unmounted => None,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::environment::Environment;
    use crate::frame::origin::Origin;
    use crate::frame::relay::MessageTarget;
    use crate::frame::routes::RouteTable;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    const SHELL: &str = "http://localhost:8090";

    fn router(env: Environment) -> ShellRouter {
        ShellRouter::new(HostFrameResolver::new(RouteTable::standard(), env))
    }

    fn policy() -> OriginPolicy {
        OriginPolicy::new().allow(Origin::parse(SHELL).unwrap())
    }

    #[test]
    fn test_route_selects_one_frame() {
        let router = router(Environment::Production);

        match router.route("/novatrace/events") {
            RouteMatch::Frame(target) => {
                assert_eq!(target.microfrontend, "novatrace");
                assert_eq!(target.sub_path, "/events");
                assert_eq!(target.src, "/novatrace/events");
            }
            RouteMatch::NotFound => panic!("Expected a frame"),
        }
        assert_eq!(router.route("/missing"), RouteMatch::NotFound);
    }

    #[test]
    fn test_lifecycle() {
        let target = MessageTarget::new();
        let mut view = ShellView::new(router(Environment::Development));
        assert_eq!(view.state(), &ViewState::Unmounted);

        let transition = view.mount("/novatrace", &target, policy(), |_| {});
        assert_eq!(
            transition,
            Transition::Reload {
                src: "http://localhost:5174/".to_string()
            }
        );
        assert!(view.is_listening());
        assert_eq!(target.listener_count(), 1);

        assert_eq!(
            view.show("/novatrace/status"),
            Transition::Reload {
                src: "http://localhost:5174/status".to_string()
            }
        );
        assert_eq!(view.show("/novatrace/status/"), Transition::Unchanged);
        assert_eq!(view.show("/nowhere"), Transition::NotFound);
        assert_eq!(view.route(), Some(&RouteMatch::NotFound));
        assert!(matches!(view.show("/"), Transition::Reload { .. }));

        view.unmount();
        assert_eq!(view.state(), &ViewState::Unmounted);
        assert_eq!(target.listener_count(), 0);
        assert_eq!(view.show("/novatrace"), Transition::NotMounted);
    }

    #[test]
    fn test_remount_keeps_single_listener() {
        let target = MessageTarget::new();
        let calls = Rc::new(RefCell::new(0));
        let mut view = ShellView::new(router(Environment::Production));

        for _ in 0..3 {
            let calls = Rc::clone(&calls);
            view.mount("/novatrace", &target, policy(), move |_| *calls.borrow_mut() += 1);
        }
        assert_eq!(target.listener_count(), 1);

        target.post(SHELL, json!({"type": "navigate", "path": "/novatrace/events"}));
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_navigation_round_trip() {
        let target = MessageTarget::new();
        let requested = Rc::new(RefCell::new(Vec::new()));
        let view = Rc::new(RefCell::new(ShellView::new(router(Environment::Production))));

        let sink = Rc::clone(&requested);
        view.borrow_mut()
            .mount("/novatrace", &target, policy(), move |path| sink.borrow_mut().push(path));

        target.post(SHELL, json!({"type": "navigate", "path": "/novatrace/events"}));

        let path = requested.borrow_mut().pop().unwrap();
        assert_eq!(
            view.borrow_mut().show(&path),
            Transition::Reload {
                src: "/novatrace/events".to_string()
            }
        );
    }

    #[test]
    fn test_drop_releases_listener() {
        let target = MessageTarget::new();
        {
            let mut view = ShellView::new(router(Environment::Production));
            view.mount("/", &target, policy(), |_| {});
            assert_eq!(target.listener_count(), 1);
        }
        assert_eq!(target.listener_count(), 0);
    }
}
