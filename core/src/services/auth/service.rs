//! Main authentication service implementation

use std::sync::Arc;

use mb_shared::validation::mask_email;
use tracing::{info, warn};

use crate::domain::value_objects::{LoginOutcome, LoginResult};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{LoginAttemptRepository, UserRepository};
use crate::services::clock::Clock;
use crate::services::password::PasswordHasher;
use crate::services::token::TokenService;

use super::throttle::LoginThrottle;

/// Canonical form of an email used as a lookup key
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Authentication service for operator login
pub struct AuthService<U, L, H, C>
where
    U: UserRepository,
    L: LoginAttemptRepository,
    H: PasswordHasher,
    C: Clock,
{
    /// User repository for credential lookup
    user_repository: Arc<U>,
    /// Failed-attempt throttle
    throttle: Arc<LoginThrottle<L, C>>,
    /// Password hasher
    hasher: Arc<H>,
    /// Token service for JWT issuance
    token_service: Arc<TokenService>,
}

impl<U, L, H, C> AuthService<U, L, H, C>
where
    U: UserRepository,
    L: LoginAttemptRepository,
    H: PasswordHasher,
    C: Clock,
{
    pub fn new(
        user_repository: Arc<U>,
        throttle: Arc<LoginThrottle<L, C>>,
        hasher: Arc<H>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            user_repository,
            throttle,
            hasher,
            token_service,
        }
    }

    /// Log in with email and password
    ///
    /// The password is always verified, against the hasher's decoy hash when
    /// the email is unknown, before the throttle is consulted. Unknown emails
    /// are throttled the same way as known ones.
    ///
    /// # Returns
    ///
    /// * `Ok(LoginResult::Success)` - Token issued
    /// * `Ok(LoginResult::Denied)` / `Ok(LoginResult::Locked)` - Throttle outcome
    /// * `Err(AuthError::InvalidCredentials)` - Throttle allowed an unknown user
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginResult> {
        let email = normalize_email(email);
        let user = self.user_repository.find_by_email(&email).await?;

        let hash = user
            .as_ref()
            .map(|u| u.password_hash.as_str())
            .unwrap_or_else(|| self.hasher.decoy_hash());
        let verified = self.hasher.verify(password, hash).await?;
        let password_matches = verified && user.is_some();

        let outcome = self.throttle.evaluate_login(&email, password_matches).await?;

        match outcome {
            LoginOutcome::Allowed => {
                let Some(user) = user else {
                    warn!(email = %mask_email(&email), "Throttle allowed login for unknown email");
                    return Err(AuthError::InvalidCredentials.into());
                };
                let token = self.token_service.issue(user.id, &user.email)?;
                info!(user_id = %user.id, email = %mask_email(&user.email), "User logged in");
                Ok(LoginResult::Success {
                    user_id: user.id,
                    email: user.email,
                    name: user.name,
                    token,
                })
            }
            LoginOutcome::Denied { attempts_remaining } => {
                Ok(LoginResult::Denied { attempts_remaining })
            }
            LoginOutcome::Locked { minutes_remaining } => {
                Ok(LoginResult::Locked { minutes_remaining })
            }
        }
    }
}
