//! Browser bindings for the frame contract
//!
//! `novatrace::frame` is written against two small traits. This module
//! implements them on top of `web_sys::Window`.

pub mod guest;
pub mod listener;
pub mod window;

pub use guest::{provide_guest_navigator, GuestNavigator};
pub use listener::WindowMessageSource;
pub use window::BrowserWindow;
