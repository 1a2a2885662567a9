//! Login throttling
//!
//! Decides whether a login attempt may proceed based on the persisted
//! per-email attempt counter. After `max_attempts` consecutive failures the
//! email is locked for `cooldown_minutes` measured from the last recorded
//! attempt, whether or not later passwords are correct.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mb_shared::validation::mask_email;
use mb_shared::ThrottleConfig;
use tracing::{debug, info, warn};

use crate::domain::entities::LoginAttemptRecord;
use crate::domain::value_objects::LoginOutcome;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::LoginAttemptRepository;
use crate::services::clock::Clock;

/// Outcome of evaluating one attempt plus the record to persist, if any
#[derive(Debug, Clone, PartialEq)]
pub struct ThrottleDecision {
    pub outcome: LoginOutcome,
    pub update: Option<LoginAttemptRecord>,
}

impl ThrottleDecision {
    fn unchanged(outcome: LoginOutcome) -> Self {
        Self {
            outcome,
            update: None,
        }
    }

    fn write(outcome: LoginOutcome, record: LoginAttemptRecord) -> Self {
        Self {
            outcome,
            update: Some(record),
        }
    }
}

/// Pure throttle state machine
pub fn evaluate(
    record: &LoginAttemptRecord,
    password_matches: bool,
    now: DateTime<Utc>,
    config: &ThrottleConfig,
) -> ThrottleDecision {
    let max_attempts = config.max_attempts;
    let cooldown = f64::from(config.cooldown_minutes);
    let elapsed = record.elapsed_minutes(now);
    let exhausted = record.attempts >= max_attempts;

    if exhausted && elapsed < cooldown {
        return ThrottleDecision::unchanged(LoginOutcome::Locked {
            minutes_remaining: cooldown - elapsed,
        });
    }

    let mut updated = record.clone();
    if password_matches {
        updated.reset(now);
        return ThrottleDecision::write(LoginOutcome::Allowed, updated);
    }

    // An expired lockout starts a new window with this failure as the first
    let attempts = if exhausted { 1 } else { record.attempts + 1 };
    updated.record_failure(attempts, now);
    ThrottleDecision::write(
        LoginOutcome::Denied {
            attempts_remaining: max_attempts.saturating_sub(attempts),
        },
        updated,
    )
}

/// Throttle service backed by a login attempt repository
pub struct LoginThrottle<R, C>
where
    R: LoginAttemptRepository,
    C: Clock,
{
    repository: Arc<R>,
    clock: Arc<C>,
    config: ThrottleConfig,
}

impl<R, C> LoginThrottle<R, C>
where
    R: LoginAttemptRepository,
    C: Clock,
{
    pub fn new(repository: Arc<R>, clock: Arc<C>, config: ThrottleConfig) -> Self {
        Self {
            repository,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &ThrottleConfig {
        &self.config
    }

    /// Evaluate one login attempt for `email` and persist the new counter
    ///
    /// A lost compare-and-swap re-reads the record and evaluates again, up
    /// to `max_write_retries` times.
    pub async fn evaluate_login(
        &self,
        email: &str,
        password_matches: bool,
    ) -> DomainResult<LoginOutcome> {
        for attempt in 0..=self.config.max_write_retries {
            let now = self.clock.now();
            let record = match self.repository.find_by_email(email).await? {
                Some(record) => record,
                None => {
                    self.repository
                        .create(LoginAttemptRecord::new(email, now))
                        .await?
                }
            };

            let decision = evaluate(&record, password_matches, now, &self.config);
            let Some(updated) = decision.update else {
                self.log_outcome(email, &decision.outcome);
                return Ok(decision.outcome);
            };

            if self
                .repository
                .compare_and_swap(&updated, record.version)
                .await?
            {
                self.log_outcome(email, &decision.outcome);
                return Ok(decision.outcome);
            }

            debug!(
                email = %mask_email(email),
                attempt = attempt + 1,
                "Lost login attempt update race, retrying"
            );
        }

        warn!(
            email = %mask_email(email),
            retries = self.config.max_write_retries,
            "Login attempt update retries exhausted"
        );
        Err(DomainError::infrastructure(
            "Concurrent modification of login attempts",
        ))
    }

    fn log_outcome(&self, email: &str, outcome: &LoginOutcome) {
        match outcome {
            LoginOutcome::Allowed => {
                debug!(email = %mask_email(email), "Login attempt allowed");
            }
            LoginOutcome::Denied { attempts_remaining } => {
                info!(
                    email = %mask_email(email),
                    attempts_remaining = *attempts_remaining,
                    "Login attempt denied"
                );
            }
            LoginOutcome::Locked { minutes_remaining } => {
                warn!(
                    email = %mask_email(email),
                    minutes_remaining = *minutes_remaining,
                    "Login attempt rejected, email locked"
                );
            }
        }
    }
}
