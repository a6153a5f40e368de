//! NovaTrace Dashboards
//!
//! Leptos (WASM) bundles for the NovaTrace microfrontends:
//!
//! - `shell`: owns the browser URL and hosts one microfrontend per route in
//!   an iframe
//! - `home`: landing page, mounted at `/`
//! - `novatrace`: alert, status and event views, mounted at `/novatrace`
//!
//! Routing and message handling come from `novatrace::frame`; this crate
//! supplies the browser bindings ([`frame`]) and the views.

pub mod api;
pub mod apps;
pub mod components;
pub mod frame;
pub mod pages;
pub mod settings;
pub mod state;
