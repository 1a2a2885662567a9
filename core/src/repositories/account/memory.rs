//! In-memory implementation of AccountRepository
//!
//! Backs the `memory` storage backend and the test suites. Version checks
//! and the two-row transfer happen under one write lock, which gives the
//! same guarantees as the conditional updates used against MySQL.

use async_trait::async_trait;
use mb_shared::Pagination;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Account;
use crate::domain::value_objects::AccountNumber;
use crate::errors::DomainError;

use super::trait_::{AccountRepository, BalanceWrite};

/// In-memory account repository
#[derive(Clone)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn find_mut<'a>(
    accounts: &'a mut HashMap<Uuid, Account>,
    account_number: &AccountNumber,
) -> Option<&'a mut Account> {
    accounts
        .values_mut()
        .find(|a| &a.account_number == account_number)
}

fn version_matches(
    accounts: &HashMap<Uuid, Account>,
    write: &BalanceWrite,
) -> bool {
    accounts
        .values()
        .any(|a| a.account_number == write.account_number && a.version == write.expected_version)
}

fn apply(accounts: &mut HashMap<Uuid, Account>, write: &BalanceWrite) {
    if let Some(account) = find_mut(accounts, &write.account_number) {
        account.apply_balance(write.new_balance);
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_account_number(
        &self,
        account_number: &AccountNumber,
    ) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| &a.account_number == account_number)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.phone == phone).cloned())
    }

    async fn exists_by_account_number(
        &self,
        account_number: &AccountNumber,
    ) -> Result<bool, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .any(|a| &a.account_number == account_number))
    }

    async fn list(&self, pagination: &Pagination) -> Result<(Vec<Account>, u64), DomainError> {
        let accounts = self.accounts.read().await;
        let mut all: Vec<Account> = accounts.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.account_number.as_str().cmp(b.account_number.as_str()))
        });
        Ok((pagination.apply(&all), all.len() as u64))
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        let conflict = accounts.values().find_map(|a| {
            if a.account_number == account.account_number {
                Some("account_number")
            } else if a.email == account.email {
                Some("email")
            } else if a.phone == account.phone {
                Some("phone")
            } else {
                None
            }
        });
        if let Some(field) = conflict {
            return Err(DomainError::Conflict {
                field: field.to_string(),
            });
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update_balance(
        &self,
        account_number: &AccountNumber,
        expected_version: i64,
        new_balance: i64,
    ) -> Result<bool, DomainError> {
        let mut accounts = self.accounts.write().await;
        let write = BalanceWrite {
            account_number: account_number.clone(),
            expected_version,
            new_balance,
        };
        if !version_matches(&accounts, &write) {
            return Ok(false);
        }
        apply(&mut accounts, &write);
        Ok(true)
    }

    async fn transfer_balances(
        &self,
        debit: BalanceWrite,
        credit: BalanceWrite,
    ) -> Result<bool, DomainError> {
        let mut accounts = self.accounts.write().await;
        if !version_matches(&accounts, &debit) || !version_matches(&accounts, &credit) {
            return Ok(false);
        }
        apply(&mut accounts, &debit);
        apply(&mut accounts, &credit);
        Ok(true)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DomainError> {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(&id) {
            Some(account) => {
                account.set_password_hash(password_hash.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut accounts = self.accounts.write().await;
        Ok(accounts.remove(&id).is_some())
    }
}
