//! Account management module
//!
//! Opening and closing accounts, account number allocation and password
//! changes. Balance changes live in the ledger module.

mod service;

#[cfg(test)]
mod tests;

pub use service::{AccountService, ChangePassword, NewAccount};
