//! API Client
//!
//! HTTP client for the alert/event backend.

pub mod client;

pub use client::*;
