//! Operator user management

mod service;

pub use service::{NewUser, UpdateUser, UserService};
