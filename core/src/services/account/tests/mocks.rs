//! Account repository wrapper simulating account number collisions

use async_trait::async_trait;
use mb_shared::Pagination;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use crate::domain::entities::Account;
use crate::domain::value_objects::AccountNumber;
use crate::errors::DomainError;
use crate::repositories::{AccountRepository, BalanceWrite, InMemoryAccountRepository};

pub struct CollidingAccountRepository {
    pub inner: InMemoryAccountRepository,
    /// `exists_by_account_number` reports this many numbers as taken first
    taken: AtomicU32,
    /// `create` rejects this many inserts with an account number conflict first
    insert_conflicts: AtomicU32,
    pub checked: Mutex<Vec<AccountNumber>>,
}

impl CollidingAccountRepository {
    pub fn new(taken: u32, insert_conflicts: u32) -> Self {
        Self {
            inner: InMemoryAccountRepository::new(),
            taken: AtomicU32::new(taken),
            insert_conflicts: AtomicU32::new(insert_conflicts),
            checked: Mutex::new(Vec::new()),
        }
    }

    fn take(counter: &AtomicU32) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl AccountRepository for CollidingAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_account_number(
        &self,
        account_number: &AccountNumber,
    ) -> Result<Option<Account>, DomainError> {
        self.inner.find_by_account_number(account_number).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.inner.find_by_email(email).await
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Account>, DomainError> {
        self.inner.find_by_phone(phone).await
    }

    async fn exists_by_account_number(
        &self,
        account_number: &AccountNumber,
    ) -> Result<bool, DomainError> {
        self.checked.lock().unwrap().push(account_number.clone());
        if Self::take(&self.taken) {
            return Ok(true);
        }
        self.inner.exists_by_account_number(account_number).await
    }

    async fn list(&self, pagination: &Pagination) -> Result<(Vec<Account>, u64), DomainError> {
        self.inner.list(pagination).await
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        if Self::take(&self.insert_conflicts) {
            return Err(DomainError::Conflict {
                field: "account_number".to_string(),
            });
        }
        self.inner.create(account).await
    }

    async fn update_balance(
        &self,
        account_number: &AccountNumber,
        expected_version: i64,
        new_balance: i64,
    ) -> Result<bool, DomainError> {
        self.inner
            .update_balance(account_number, expected_version, new_balance)
            .await
    }

    async fn transfer_balances(
        &self,
        debit: BalanceWrite,
        credit: BalanceWrite,
    ) -> Result<bool, DomainError> {
        self.inner.transfer_balances(debit, credit).await
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DomainError> {
        self.inner.update_password(id, password_hash).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        self.inner.delete(id).await
    }
}
