//! Authentication service module
//!
//! This module provides:
//! - The login throttle state machine and its persistence loop
//! - Email/password login returning a JWT on success

mod service;
pub mod throttle;

#[cfg(test)]
mod tests;

pub use service::{normalize_email, AuthService};
pub use throttle::{evaluate, LoginThrottle, ThrottleDecision};
