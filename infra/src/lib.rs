//! # Infrastructure Layer
//!
//! Concrete adapters for the MiniBank core:
//! - **Database**: MySQL repositories using SQLx
//! - **Security**: bcrypt password hashing
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use mb_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Password hashing
pub mod security;

#[cfg(feature = "mysql")]
pub use database::{
    DatabasePool, MySqlAccountRepository, MySqlLoginAttemptRepository, MySqlUserRepository,
};
pub use security::BcryptPasswordHasher;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure at startup
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Password hashing error
    #[error("Hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Blocking task was cancelled or panicked
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::infrastructure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infrastructure_error_maps_to_domain() {
        let err: DomainError = InfrastructureError::Config("missing url".to_string()).into();
        assert!(err.is_infrastructure());
        assert_eq!(
            err.to_string(),
            "Infrastructure error: Configuration error: missing url"
        );
    }
}
