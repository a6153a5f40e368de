//! Microfrontend Frame Contract
//!
//! How the shell and its embedded dashboards cooperate:
//!
//! - **routes**: static route table (host prefix → microfrontend → URLs)
//! - **resolver**: iframe `src` computation and the shell-side message relay
//! - **bridge**: frame-side navigation reporting to the parent window
//! - **relay**: owned `message` listener subscriptions
//! - **shell**: route selection and the hosting view lifecycle
//! - **origin**: origin parsing and the message allow-list
//! - **manifest**: the table and allow-list a running shell hands to browser bundles
//!
//! # Flow
//!
//! ```text
//! click in frame ─▶ NavigationBridge::emit_navigate ─▶ postMessage(parent)
//!                                                          │
//! iframe reload ◀─ ShellView::show ◀─ router navigate ◀─ relay::attach listener
//! ```
//!
//! Nothing in this module depends on an async runtime or the browser; the
//! UI crate supplies [`FrameWindow`] and [`MessageSource`] implementations
//! over `web_sys`.

pub mod bridge;
pub mod environment;
pub mod error;
pub mod manifest;
pub mod message;
pub mod origin;
pub mod relay;
pub mod resolver;
pub mod routes;
pub mod shell;

pub use bridge::{Emitted, FrameWindow, NavigationBridge, TargetOrigin};
pub use environment::Environment;
pub use error::{FrameError, FrameResult};
pub use manifest::ShellManifest;
pub use message::{FrameMessage, MessageEvent};
pub use origin::{Origin, OriginPolicy};
pub use relay::{attach, Listener, ListenerId, MessageSource, MessageTarget, Subscription};
pub use resolver::{resolve_frame_url, HostFrameResolver};
pub use routes::{Microfrontend, RouteEntry, RouteTable, ROOT_SUB_PATH};
pub use shell::{FrameTarget, RouteMatch, ShellRouter, ShellView, Transition, ViewState};
