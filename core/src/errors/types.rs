//! Error types for authentication and ledger operations
//!
//! Business outcomes such as a denied login or insufficient funds are not
//! errors; they are returned as typed outcomes by the services. These enums
//! cover requests that cannot be evaluated at all.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password confirmation does not match")]
    PasswordMismatch,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,
}

/// Balance ledger errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Source and target accounts must differ")]
    SameAccountTransfer,

    #[error("Balance would overflow")]
    BalanceOverflow,

    #[error("Concurrent modification, retries exhausted")]
    ConcurrentModification,

    #[error("Could not allocate a free account number")]
    AccountNumberExhausted,
}
