//! Login throttle configuration module

use serde::{Deserialize, Serialize};

/// Failed-login throttling limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThrottleConfig {
    /// Failed attempts allowed before the lockout window applies
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Lockout window in minutes, measured from the last recorded attempt
    #[serde(default = "default_cooldown_minutes")]
    pub cooldown_minutes: u32,

    /// How often a lost compare-and-swap on the attempt record is retried
    #[serde(default = "default_max_write_retries")]
    pub max_write_retries: u32,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            cooldown_minutes: default_cooldown_minutes(),
            max_write_retries: default_max_write_retries(),
        }
    }
}

fn default_max_attempts() -> u32 {
    5
}

fn default_cooldown_minutes() -> u32 {
    30
}

fn default_max_write_retries() -> u32 {
    5
}
