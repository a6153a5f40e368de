//! UI Components
//!
//! Reusable Leptos components shared by the shell and the microfrontends.

pub mod alert_card;
pub mod frame_host;
pub mod loading;
pub mod modal;
pub mod nav;
pub mod toast;

pub use alert_card::AlertCard;
pub use frame_host::FrameHost;
pub use loading::{ListSkeleton, Loading};
pub use modal::PreformattedModal;
pub use nav::{GuestNav, ShellNav};
pub use toast::Toast;
