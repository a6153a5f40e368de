//! API Routes
//!
//! Route handlers organized by functionality.

pub mod bundles;
pub mod frames;
pub mod health;
