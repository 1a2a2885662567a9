//! Login attempt repository trait.

use async_trait::async_trait;

use crate::domain::entities::LoginAttemptRecord;
use crate::errors::DomainError;

/// Persistence for per-email login attempt counters
#[async_trait]
pub trait LoginAttemptRepository: Send + Sync {
    /// Find the record for an email
    async fn find_by_email(&self, email: &str) -> Result<Option<LoginAttemptRecord>, DomainError>;

    /// Insert a new record
    ///
    /// When another writer created the record first, the stored record is
    /// returned instead and `record` is discarded.
    async fn create(&self, record: LoginAttemptRecord) -> Result<LoginAttemptRecord, DomainError>;

    /// Replace the stored record if it is still at `expected_version`
    ///
    /// # Returns
    /// * `Ok(true)` - Written; the stored version is now `expected_version + 1`
    /// * `Ok(false)` - Another writer got there first
    async fn compare_and_swap(
        &self,
        record: &LoginAttemptRecord,
        expected_version: i64,
    ) -> Result<bool, DomainError>;
}
