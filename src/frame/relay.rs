//! Navigation relay
//!
//! Listens for `message` events on a [`MessageSource`] and forwards valid
//! navigation requests to a callback. The listener is owned by the returned
//! [`Subscription`] and removed when it is detached or dropped.
//!
//! Everything here runs on one thread (the browser main thread, or a test),
//! so shared state is `Rc<RefCell<_>>` rather than locks.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::message::{FrameMessage, MessageEvent};
use super::origin::OriginPolicy;

/// Handle identifying a registered listener
pub type ListenerId = u64;

/// Callback invoked for every delivered message event
pub type Listener = Box<dyn FnMut(&MessageEvent)>;

/// Something that delivers `message` events (a browser window, or
/// [`MessageTarget`] outside the browser)
pub trait MessageSource {
    /// Register a listener, returning an id for removal
    fn add_listener(&self, listener: Listener) -> ListenerId;

    /// Remove a listener. Returns false if it was not registered.
    fn remove_listener(&self, id: ListenerId) -> bool;
}

/// In-process message event target
#[derive(Clone, Default)]
pub struct MessageTarget {
    inner: Rc<RefCell<TargetInner>>,
}

#[derive(Default)]
struct TargetInner {
    next_id: ListenerId,
    listeners: Vec<(ListenerId, Rc<RefCell<Listener>>)>,
}

impl MessageTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an event to every listener registered at the time of the call.
    ///
    /// Listeners may detach themselves or others while being dispatched to;
    /// a listener removed mid-dispatch is not called afterwards.
    pub fn dispatch(&self, event: &MessageEvent) {
        let snapshot: Vec<(ListenerId, Rc<RefCell<Listener>>)> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(id, l)| (*id, Rc::clone(l)))
            .collect();

        for (id, listener) in snapshot {
            if !self.is_registered(id) {
                continue;
            }
            // A listener re-entering dispatch does not receive its own nested event
            if let Ok(mut listener) = listener.try_borrow_mut() {
                listener(event);
            }
        }
    }

    /// Convenience for `dispatch(&MessageEvent::new(origin, data))`
    pub fn post(&self, origin: &str, data: serde_json::Value) {
        self.dispatch(&MessageEvent::new(origin, data));
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.inner.borrow().listeners.iter().any(|(l, _)| *l == id)
    }
}

impl MessageSource for MessageTarget {
    fn add_listener(&self, listener: Listener) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(RefCell::new(listener))));
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|(l, _)| *l != id);
        inner.listeners.len() != before
    }
}

impl fmt::Debug for MessageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageTarget")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Owned registration of a listener. Dropping it detaches the listener.
#[must_use = "dropping a Subscription detaches its listener immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap a release action run exactly once on detach or drop
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Remove the listener now
    pub fn detach(mut self) {
        self.release();
    }

    pub fn is_attached(&self) -> bool {
        self.release.is_some()
    }

    fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Register a navigation listener on `source`.
///
/// `on_navigate` is called once per well-formed navigate message whose
/// origin passes `policy`. Everything else is ignored.
pub fn attach<S, F>(source: &S, policy: OriginPolicy, mut on_navigate: F) -> Subscription
where
    S: MessageSource + Clone + 'static,
    F: FnMut(String) + 'static,
{
    let listener: Listener = Box::new(move |event: &MessageEvent| {
        let Some(path) = FrameMessage::navigation_path(&event.data) else {
            tracing::trace!(origin = %event.origin, "Ignoring non-navigation message");
            return;
        };

        if !policy.allows(&event.origin) {
            tracing::warn!(origin = %event.origin, path = %path, "Ignoring navigation from unexpected origin");
            return;
        }

        tracing::debug!(origin = %event.origin, path = %path, "Relaying frame navigation");
        on_navigate(path.to_string());
    });

    let id = source.add_listener(listener);
    let source = source.clone();

    Subscription::new(move || {
        source.remove_listener(id);
    })
}
