//! Persisted login attempt counter, keyed by email.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-email failed login counter
///
/// Created lazily on the first attempt for an email and never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginAttemptRecord {
    /// Email the attempts were made for (not necessarily a known user)
    pub email: String,

    /// Time of the last attempt that changed this record
    pub last_login_at: DateTime<Utc>,

    /// Consecutive failed attempts
    pub attempts: u32,

    /// Optimistic concurrency token
    pub version: i64,
}

impl LoginAttemptRecord {
    /// A fresh record with no failed attempts
    pub fn new(email: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            email: email.into(),
            last_login_at: now,
            attempts: 0,
            version: 0,
        }
    }

    /// Fractional minutes elapsed since the last recorded attempt
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> f64 {
        (now - self.last_login_at).num_milliseconds() as f64 / 60_000.0
    }

    /// Clears the failure counter
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.attempts = 0;
        self.last_login_at = now;
    }

    /// Sets the failure counter to `attempts` and stamps the attempt time
    pub fn record_failure(&mut self, attempts: u32, now: DateTime<Utc>) {
        self.attempts = attempts;
        self.last_login_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_elapsed_minutes_is_fractional() {
        let start = Utc::now();
        let record = LoginAttemptRecord::new("a@example.com", start);
        let later = start + Duration::seconds(90);
        assert!((record.elapsed_minutes(later) - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset_and_record_failure() {
        let start = Utc::now();
        let mut record = LoginAttemptRecord::new("a@example.com", start);
        let later = start + Duration::minutes(3);

        record.record_failure(4, later);
        assert_eq!(record.attempts, 4);
        assert_eq!(record.last_login_at, later);

        record.reset(start);
        assert_eq!(record.attempts, 0);
        assert_eq!(record.last_login_at, start);
    }
}
