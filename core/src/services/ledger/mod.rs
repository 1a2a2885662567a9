//! Balance ledger module
//!
//! All balance changes go through [`LedgerService`]: single-account deltas
//! and same-bank transfers, both guarded by the account version.

mod service;

#[cfg(test)]
mod tests;

pub use service::LedgerService;
