//! Token service module for JWT management
//!
//! Issues and verifies HS256 access tokens. There are no refresh tokens;
//! clients log in again once the access token expires.

mod service;

#[cfg(test)]
mod tests;

pub use service::TokenService;
