//! Account repository trait defining the interface for account persistence.
//!
//! Balance and password writes are conditional on the account's `version`
//! so that concurrent requests never overwrite each other's changes.

use async_trait::async_trait;
use mb_shared::Pagination;
use uuid::Uuid;

use crate::domain::entities::Account;
use crate::domain::value_objects::AccountNumber;
use crate::errors::DomainError;

/// One side of a conditional balance write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceWrite {
    pub account_number: AccountNumber,
    /// Version the row must still carry for the write to apply
    pub expected_version: i64,
    pub new_balance: i64,
}

impl BalanceWrite {
    /// A write that replaces `account`'s balance if it is still at its current version
    pub fn for_account(account: &Account, new_balance: i64) -> Self {
        Self {
            account_number: account.account_number.clone(),
            expected_version: account.version,
            new_balance,
        }
    }
}

/// Repository trait for Account entity persistence operations
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find an account by its account number
    async fn find_by_account_number(
        &self,
        account_number: &AccountNumber,
    ) -> Result<Option<Account>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Account>, DomainError>;

    /// Check whether an account number is already taken
    async fn exists_by_account_number(
        &self,
        account_number: &AccountNumber,
    ) -> Result<bool, DomainError>;

    /// List accounts ordered by creation time
    ///
    /// # Returns
    /// * `Ok((accounts, total))` - The requested page and the total account count
    async fn list(&self, pagination: &Pagination) -> Result<(Vec<Account>, u64), DomainError>;

    /// Insert a new account
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account
    /// * `Err(DomainError::Conflict { field })` - `account_number`, `email` or
    ///   `phone` is already in use
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Set the balance if the row is still at `expected_version`
    ///
    /// # Returns
    /// * `Ok(true)` - Written; the stored version is now `expected_version + 1`
    /// * `Ok(false)` - Version changed since it was read (or the row is gone)
    async fn update_balance(
        &self,
        account_number: &AccountNumber,
        expected_version: i64,
        new_balance: i64,
    ) -> Result<bool, DomainError>;

    /// Apply both writes atomically
    ///
    /// Either both version preconditions hold and both rows are written, or
    /// nothing is written and `Ok(false)` is returned.
    async fn transfer_balances(
        &self,
        debit: BalanceWrite,
        credit: BalanceWrite,
    ) -> Result<bool, DomainError>;

    /// Replace the password hash
    ///
    /// # Returns
    /// * `Ok(false)` - No account with this id
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DomainError>;

    /// Delete an account
    ///
    /// # Returns
    /// * `Ok(true)` - Account was deleted
    /// * `Ok(false)` - Account not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
