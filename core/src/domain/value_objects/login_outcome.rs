//! Outcomes of a login attempt.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Decision of the login throttle for a single attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoginOutcome {
    /// Password matched and the email is not locked out
    Allowed,
    /// Password did not match; further attempts remain before lockout
    Denied { attempts_remaining: u32 },
    /// Too many failures; retry after the remaining (fractional) minutes
    Locked { minutes_remaining: f64 },
}

impl LoginOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, LoginOutcome::Allowed)
    }
}

/// Result of a full login: throttle decision plus user and token on success
#[derive(Debug, Clone, PartialEq)]
pub enum LoginResult {
    Success {
        user_id: Uuid,
        email: String,
        name: String,
        token: String,
    },
    Denied {
        attempts_remaining: u32,
    },
    Locked {
        minutes_remaining: f64,
    },
}
