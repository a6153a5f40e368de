//! `FrameWindow` for the real browser window

use novatrace::frame::{FrameError, FrameResult, FrameWindow, Origin};
use wasm_bindgen::JsValue;

/// The current `window`
#[derive(Clone, Debug)]
pub struct BrowserWindow {
    window: web_sys::Window,
}

impl BrowserWindow {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }

    /// `web_sys::window()`, if running in a browser main thread
    pub fn current() -> Option<Self> {
        web_sys::window().map(Self::new)
    }

    pub fn inner(&self) -> &web_sys::Window {
        &self.window
    }

    /// `location.pathname`, or `/` when unavailable
    pub fn pathname(&self) -> String {
        self.window
            .location()
            .pathname()
            .unwrap_or_else(|_| "/".to_string())
    }

    /// Full page load of `url` in this window
    pub fn load(&self, url: &str) -> FrameResult<()> {
        self.window
            .location()
            .set_href(url)
            .map_err(|e| FrameError::PostFailed(describe(&e)))
    }
}

impl FrameWindow for BrowserWindow {
    fn is_top_level(&self) -> bool {
        match self.window.parent() {
            Ok(Some(parent)) => {
                let parent: &JsValue = parent.as_ref();
                let own: &JsValue = self.window.as_ref();
                js_sys::Object::is(parent, own)
            }
            _ => true,
        }
    }

    fn origin(&self) -> FrameResult<Origin> {
        let raw = self
            .window
            .location()
            .origin()
            .map_err(|e| FrameError::InvalidOrigin(describe(&e)))?;
        Origin::parse(&raw)
    }

    fn post_to_parent(&self, message: &str, target_origin: &Origin) -> FrameResult<()> {
        let parent = self
            .window
            .parent()
            .map_err(|e| FrameError::PostFailed(describe(&e)))?
            .ok_or_else(|| FrameError::PostFailed("no parent window".to_string()))?;

        let data =
            js_sys::JSON::parse(message).map_err(|e| FrameError::Serialization(describe(&e)))?;

        parent
            .post_message(&data, target_origin.as_str())
            .map_err(|e| FrameError::PostFailed(describe(&e)))
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
