//! Pages
//!
//! Top-level views for each microfrontend route.

pub mod alerts;
pub mod events;
pub mod home;
pub mod not_found;
pub mod status;

pub use alerts::Alerts;
pub use events::Events;
pub use home::Home;
pub use not_found::NotFound;
pub use status::Status;
