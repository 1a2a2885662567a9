//! Shared utilities and common types for the MiniBank server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Pagination and health response types
//! - Validation and masking helpers

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, BootstrapAdmin, DatabaseConfig, Environment, LedgerConfig, LoggingConfig,
    ServerConfig, StorageBackend, StorageConfig, ThrottleConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{HealthResponse, HealthStatus, PaginatedResponse, Pagination};
pub use utils::validation;
