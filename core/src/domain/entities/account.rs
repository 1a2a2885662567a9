//! Bank account entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::AccountNumber;

/// A customer account in the ledger
///
/// `balance` is only changed through the ledger service, which guarantees it
/// never goes negative. `version` is bumped on every balance or password
/// write and guards those writes with compare-and-swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Ten digit, zero padded account number
    pub account_number: AccountNumber,

    /// Account holder name
    pub name: String,

    /// Contact email (unique)
    pub email: String,

    /// Contact phone (unique)
    pub phone: String,

    /// Balance in minor currency units
    pub balance: i64,

    /// Bcrypt hash of the account password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Optimistic concurrency token
    pub version: i64,

    /// Timestamp when the account was opened
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last write
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new account with a zero balance
    pub fn new(
        account_number: AccountNumber,
        name: String,
        email: String,
        phone: String,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            account_number,
            name,
            email,
            phone,
            balance: 0,
            password_hash,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Balance after applying `delta`, or `None` on i64 overflow
    pub fn balance_after(&self, delta: i64) -> Option<i64> {
        self.balance.checked_add(delta)
    }

    /// Applies a persisted balance write to this in-memory copy
    pub fn apply_balance(&mut self, new_balance: i64) {
        self.balance = new_balance;
        self.version += 1;
        self.updated_at = Utc::now();
    }

    /// Replaces the password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.version += 1;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account::new(
            AccountNumber::parse("0000000042").unwrap(),
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "+10000000001".to_string(),
            "hash".to_string(),
        )
    }

    #[test]
    fn test_new_account_is_empty() {
        let account = account();
        assert_eq!(account.balance, 0);
        assert_eq!(account.version, 0);
        assert_eq!(account.created_at, account.updated_at);
    }

    #[test]
    fn test_balance_after_checks_overflow() {
        let mut account = account();
        account.balance = i64::MAX - 1;
        assert_eq!(account.balance_after(1), Some(i64::MAX));
        assert_eq!(account.balance_after(2), None);
        assert_eq!(account.balance_after(-(i64::MAX - 1)), Some(0));
    }

    #[test]
    fn test_apply_balance_bumps_version() {
        let mut account = account();
        account.apply_balance(150);
        assert_eq!(account.balance, 150);
        assert_eq!(account.version, 1);
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let json = serde_json::to_value(account()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["account_number"], "0000000042");
    }
}
