//! # MiniBank API
//!
//! actix-web application: routes, DTOs, JWT middleware and the mapping from
//! domain errors to HTTP responses. `main.rs` wires it to a storage backend.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState};
