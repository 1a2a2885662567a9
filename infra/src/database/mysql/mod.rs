//! MySQL-specific database implementations
//!
//! This module contains MySQL implementations of repository traits
//! using SQLx for database operations.

pub mod account_repository_impl;
pub mod login_attempt_repository_impl;
pub mod user_repository_impl;

// Re-export the MySQL implementations
pub use account_repository_impl::MySqlAccountRepository;
pub use login_attempt_repository_impl::MySqlLoginAttemptRepository;
pub use user_repository_impl::MySqlUserRepository;

use mb_core::errors::DomainError;

/// Wraps a driver error with the operation that failed
pub(crate) fn query_error(context: &str, err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, "{}", context);
    DomainError::infrastructure(format!("{}: {}", context, err))
}

/// Maps a failed INSERT or UPDATE, turning unique-key violations into `Conflict`
///
/// `unique_columns` lists the candidate columns in the order they are
/// reported; the first one named by the violated index wins.
pub(crate) fn insert_error(context: &str, err: sqlx::Error, unique_columns: &[&str]) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            // "Duplicate entry '...' for key 'accounts.uk_accounts_email'"
            let message = db_err.message();
            let key = message.rsplit("for key").next().unwrap_or(message);
            let field = unique_columns
                .iter()
                .find(|column| key.contains(*column))
                .or_else(|| unique_columns.first())
                .copied()
                .unwrap_or("unknown");
            return DomainError::Conflict {
                field: field.to_string(),
            };
        }
    }
    query_error(context, err)
}

/// Decodes a column, reporting decode failures as infrastructure errors
pub(crate) fn column<'r, T>(row: &'r sqlx::mysql::MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    use sqlx::Row;
    row.try_get(name)
        .map_err(|e| DomainError::infrastructure(format!("Failed to get {}: {}", name, e)))
}

pub(crate) fn parse_uuid(value: &str) -> Result<uuid::Uuid, DomainError> {
    uuid::Uuid::parse_str(value)
        .map_err(|e| DomainError::infrastructure(format!("Invalid UUID: {}", e)))
}
