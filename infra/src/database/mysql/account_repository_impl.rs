//! MySQL implementation of the AccountRepository trait.
//!
//! Balance writes are conditional on the `version` column; a write that
//! matches zero rows means another request changed the account first.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;
use uuid::Uuid;

use mb_core::domain::entities::Account;
use mb_core::domain::value_objects::AccountNumber;
use mb_core::errors::DomainError;
use mb_core::repositories::{AccountRepository, BalanceWrite};
use mb_shared::Pagination;

use super::{column, insert_error, parse_uuid, query_error};

const SELECT_ACCOUNT: &str = r#"
    SELECT id, account_number, name, email, phone, balance,
           password_hash, version, created_at, updated_at
    FROM accounts
"#;

const UPDATE_BALANCE: &str = r#"
    UPDATE accounts
    SET balance = ?, version = version + 1, updated_at = ?
    WHERE account_number = ? AND version = ?
"#;

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = column(row, "id")?;
        let account_number: String = column(row, "account_number")?;

        Ok(Account {
            id: parse_uuid(&id)?,
            account_number: AccountNumber::parse(account_number)?,
            name: column(row, "name")?,
            email: column(row, "email")?,
            phone: column(row, "phone")?,
            balance: column(row, "balance")?,
            password_hash: column(row, "password_hash")?,
            version: column(row, "version")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    async fn find_one(&self, filter: &str, value: &str) -> Result<Option<Account>, DomainError> {
        let query = format!("{} WHERE {} = ? LIMIT 1", SELECT_ACCOUNT, filter);

        let result = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to find account", e))?;

        result.as_ref().map(Self::row_to_account).transpose()
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.find_one("id", &id.to_string()).await
    }

    async fn find_by_account_number(
        &self,
        account_number: &AccountNumber,
    ) -> Result<Option<Account>, DomainError> {
        self.find_one("account_number", account_number.as_str()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.find_one("email", email).await
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Account>, DomainError> {
        self.find_one("phone", phone).await
    }

    async fn exists_by_account_number(
        &self,
        account_number: &AccountNumber,
    ) -> Result<bool, DomainError> {
        let query = "SELECT EXISTS(SELECT 1 FROM accounts WHERE account_number = ?) AS taken";

        let row = sqlx::query(query)
            .bind(account_number.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error("Failed to check account number", e))?;

        let taken: i64 = column(&row, "taken")?;
        Ok(taken == 1)
    }

    async fn list(&self, pagination: &Pagination) -> Result<(Vec<Account>, u64), DomainError> {
        let query = format!(
            "{} ORDER BY created_at ASC, account_number ASC LIMIT ? OFFSET ?",
            SELECT_ACCOUNT
        );

        let rows = sqlx::query(&query)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("Failed to list accounts", e))?;

        let accounts = rows
            .iter()
            .map(Self::row_to_account)
            .collect::<Result<Vec<_>, _>>()?;

        let count_row = sqlx::query("SELECT COUNT(*) AS total FROM accounts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error("Failed to count accounts", e))?;
        let total: i64 = column(&count_row, "total")?;

        Ok((accounts, total.max(0) as u64))
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO accounts (
                id, account_number, name, email, phone, balance,
                password_hash, version, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(account.account_number.as_str())
            .bind(&account.name)
            .bind(&account.email)
            .bind(&account.phone)
            .bind(account.balance)
            .bind(&account.password_hash)
            .bind(account.version)
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                insert_error(
                    "Failed to create account",
                    e,
                    &["account_number", "email", "phone"],
                )
            })?;

        Ok(account)
    }

    async fn update_balance(
        &self,
        account_number: &AccountNumber,
        expected_version: i64,
        new_balance: i64,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(UPDATE_BALANCE)
            .bind(new_balance)
            .bind(Utc::now())
            .bind(account_number.as_str())
            .bind(expected_version)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to update balance", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn transfer_balances(
        &self,
        debit: BalanceWrite,
        credit: BalanceWrite,
    ) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_error("Failed to begin transfer", e))?;

        let now = Utc::now();
        for write in [&debit, &credit] {
            let result = sqlx::query(UPDATE_BALANCE)
                .bind(write.new_balance)
                .bind(now)
                .bind(write.account_number.as_str())
                .bind(write.expected_version)
                .execute(&mut *tx)
                .await
                .map_err(|e| query_error("Failed to apply transfer", e))?;

            if result.rows_affected() != 1 {
                tx.rollback()
                    .await
                    .map_err(|e| query_error("Failed to roll back transfer", e))?;
                return Ok(false);
            }
        }

        tx.commit()
            .await
            .map_err(|e| query_error("Failed to commit transfer", e))?;
        Ok(true)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE accounts
            SET password_hash = ?, version = version + 1, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(password_hash)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to update password", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to delete account", e))?;

        Ok(result.rows_affected() > 0)
    }
}
