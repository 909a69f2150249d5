//! Type definitions module.
//!
//! Contains shared types used across the application.

pub mod chain;
pub mod units;

pub use chain::*;
pub use units::*;
