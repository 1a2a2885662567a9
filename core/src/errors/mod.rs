//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, LedgerError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Duplicate value for {field}")]
    Conflict { field: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Infrastructure error: {message}")]
    Infrastructure { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        DomainError::Infrastructure {
            message: message.into(),
        }
    }

    /// True for failures of the backing store or its concurrency control
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            DomainError::Infrastructure { .. }
                | DomainError::Ledger(LedgerError::ConcurrentModification)
                | DomainError::Ledger(LedgerError::AccountNumberExhausted)
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
