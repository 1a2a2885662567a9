//! bcrypt implementation of the core `PasswordHasher`.
//!
//! Hashing runs on the blocking thread pool so a slow cost factor never
//! stalls the async workers.

use async_trait::async_trait;
use uuid::Uuid;

use mb_core::errors::DomainResult;
use mb_core::services::PasswordHasher;

use crate::InfrastructureError;

/// Password hasher backed by bcrypt
pub struct BcryptPasswordHasher {
    cost: u32,
    decoy_hash: String,
}

impl BcryptPasswordHasher {
    /// Creates a hasher and precomputes the decoy hash at the same cost
    pub async fn new(cost: u32) -> Result<Self, InfrastructureError> {
        let secret = Uuid::new_v4().to_string();
        let decoy_hash = tokio::task::spawn_blocking(move || bcrypt::hash(secret, cost)).await??;

        Ok(Self { cost, decoy_hash })
    }

    /// Hasher with bcrypt's default cost
    pub async fn with_default_cost() -> Result<Self, InfrastructureError> {
        Self::new(bcrypt::DEFAULT_COST).await
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, plain: &str) -> DomainResult<String> {
        let plain = plain.to_owned();
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(plain, cost))
            .await
            .map_err(InfrastructureError::from)?
            .map_err(InfrastructureError::from)?;
        Ok(hashed)
    }

    async fn verify(&self, plain: &str, hash: &str) -> DomainResult<bool> {
        let plain = plain.to_owned();
        let hash = hash.to_owned();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hash))
            .await
            .map_err(InfrastructureError::from)?
            .map_err(InfrastructureError::from)?;
        Ok(matches)
    }

    fn decoy_hash(&self) -> &str {
        &self.decoy_hash
    }
}
