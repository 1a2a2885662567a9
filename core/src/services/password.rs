//! Password hashing capability.

use async_trait::async_trait;

use crate::errors::DomainResult;

/// Hashes and verifies passwords
///
/// Implementations are expected to be slow on purpose. `decoy_hash` is a
/// valid hash of an unguessable secret, verified against when the account
/// being logged into does not exist so both paths cost the same.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, plain: &str) -> DomainResult<String>;

    async fn verify(&self, plain: &str, hash: &str) -> DomainResult<bool>;

    fn decoy_hash(&self) -> &str;
}
