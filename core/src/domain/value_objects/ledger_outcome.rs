//! Outcomes of balance ledger operations.

use serde::{Deserialize, Serialize};

use super::AccountNumber;

/// Result of applying a signed delta to one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BalanceChange {
    Applied { balance: i64 },
    InsufficientFunds { balance: i64 },
    AccountNotFound,
}

/// Result of moving money between two accounts of this bank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransferOutcome {
    Completed {
        source_balance: i64,
        target_balance: i64,
    },
    /// `balance` is the source account's current balance
    InsufficientFunds { balance: i64 },
    AccountNotFound { account_number: AccountNumber },
}
