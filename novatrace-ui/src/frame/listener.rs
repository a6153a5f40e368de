//! `message` events from the browser window
//!
//! Each registered listener is wrapped in a `Closure` and kept alive in a
//! shared map until it is removed, so a dropped `Subscription` both
//! unregisters the DOM listener and frees the closure.

use novatrace::frame::{Listener, ListenerId, MessageEvent, MessageSource};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type DomCallback = Closure<dyn FnMut(web_sys::MessageEvent)>;

/// [`MessageSource`] backed by `window.addEventListener("message", ...)`
#[derive(Clone)]
pub struct WindowMessageSource {
    window: web_sys::Window,
    callbacks: Rc<RefCell<HashMap<ListenerId, DomCallback>>>,
    next_id: Rc<Cell<ListenerId>>,
}

impl WindowMessageSource {
    pub fn new(window: web_sys::Window) -> Self {
        Self {
            window,
            callbacks: Rc::new(RefCell::new(HashMap::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    pub fn current() -> Option<Self> {
        web_sys::window().map(Self::new)
    }

    pub fn listener_count(&self) -> usize {
        self.callbacks.borrow().len()
    }
}

impl MessageSource for WindowMessageSource {
    fn add_listener(&self, mut listener: Listener) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let callback = Closure::wrap(Box::new(move |event: web_sys::MessageEvent| {
            // Data that is not JSON-representable cannot be a navigate message
            if let Some(event) = to_message_event(&event) {
                listener(&event);
            }
        }) as Box<dyn FnMut(web_sys::MessageEvent)>);

        if let Err(e) = self
            .window
            .add_event_listener_with_callback("message", callback.as_ref().unchecked_ref())
        {
            web_sys::console::error_1(&format!("Failed to add message listener: {:?}", e).into());
        }

        self.callbacks.borrow_mut().insert(id, callback);
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        let Some(callback) = self.callbacks.borrow_mut().remove(&id) else {
            return false;
        };

        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("message", callback.as_ref().unchecked_ref())
        {
            web_sys::console::error_1(&format!("Failed to remove message listener: {:?}", e).into());
        }
        true
    }
}

/// Copy a DOM `MessageEvent` into the contract's plain representation
fn to_message_event(event: &web_sys::MessageEvent) -> Option<MessageEvent> {
    let text = js_sys::JSON::stringify(&event.data())
        .ok()
        .and_then(|s| s.as_string())?;
    let data = serde_json::from_str(&text).ok()?;
    Some(MessageEvent::new(event.origin(), data))
}
