//! In-memory implementation of LoginAttemptRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::LoginAttemptRecord;
use crate::errors::DomainError;

use super::trait_::LoginAttemptRepository;

/// In-memory login attempt repository
#[derive(Clone, Default)]
pub struct InMemoryLoginAttemptRepository {
    records: Arc<RwLock<HashMap<String, LoginAttemptRecord>>>,
}

impl InMemoryLoginAttemptRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing version checks
    pub async fn insert(&self, record: LoginAttemptRecord) {
        self.records
            .write()
            .await
            .insert(record.email.clone(), record);
    }
}

#[async_trait]
impl LoginAttemptRepository for InMemoryLoginAttemptRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<LoginAttemptRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(email).cloned())
    }

    async fn create(&self, record: LoginAttemptRecord) -> Result<LoginAttemptRecord, DomainError> {
        let mut records = self.records.write().await;
        let stored = records
            .entry(record.email.clone())
            .or_insert(record)
            .clone();
        Ok(stored)
    }

    async fn compare_and_swap(
        &self,
        record: &LoginAttemptRecord,
        expected_version: i64,
    ) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        match records.get_mut(&record.email) {
            Some(stored) if stored.version == expected_version => {
                *stored = LoginAttemptRecord {
                    version: expected_version + 1,
                    ..record.clone()
                };
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
