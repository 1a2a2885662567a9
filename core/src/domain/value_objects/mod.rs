//! Value objects representing immutable domain concepts.

pub mod account_number;
pub mod ledger_outcome;
pub mod login_outcome;
pub mod user_query;

// Re-export commonly used types
pub use account_number::{AccountNumber, ACCOUNT_NUMBER_LENGTH};
pub use ledger_outcome::{BalanceChange, TransferOutcome};
pub use login_outcome::{LoginOutcome, LoginResult};
pub use user_query::{SortDirection, UserField, UserListQuery, UserSearch, UserSort};
