//! HTTP route handlers

pub mod auth;
pub mod bank;
pub mod health;
pub mod users;
