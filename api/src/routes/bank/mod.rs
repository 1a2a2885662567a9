//! Account lifecycle and balance ledger handlers

pub mod accounts;
pub mod ledger;
