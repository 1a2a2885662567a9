//! Ledger configuration module

use serde::{Deserialize, Serialize};

/// Retry bounds for the balance ledger
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerConfig {
    /// How often a balance write that lost a version race is retried
    #[serde(default = "default_max_write_retries")]
    pub max_write_retries: u32,

    /// Random draws allowed when looking for a free account number
    #[serde(default = "default_max_account_number_attempts")]
    pub max_account_number_attempts: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_write_retries: default_max_write_retries(),
            max_account_number_attempts: default_max_account_number_attempts(),
        }
    }
}

fn default_max_write_retries() -> u32 {
    5
}

fn default_max_account_number_attempts() -> u32 {
    20
}
