//! State Management
//!
//! Reactive state for the NovaTrace dashboard.

pub mod global;

pub use global::{provide_global_state, Detail, GlobalState};
