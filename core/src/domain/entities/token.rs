//! JWT claims for access tokens.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default access token lifetime
pub const DEFAULT_TOKEN_EXPIRY_MINUTES: i64 = 60;

/// JWT issuer
pub const JWT_ISSUER: &str = "minibank";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Email of the authenticated user
    pub email: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for an access token
    pub fn new_access_token(
        user_id: Uuid,
        email: impl Into<String>,
        issuer: impl Into<String>,
        now: DateTime<Utc>,
        expiry_minutes: i64,
    ) -> Self {
        let expiry = now + Duration::minutes(expiry_minutes);

        Self {
            sub: user_id.to_string(),
            email: email.into(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.into(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Seconds until the token expires, as seen at `now`
    pub fn expires_in(&self, now: DateTime<Utc>) -> i64 {
        (self.exp - now.timestamp()).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_access_token_claims() {
        let user_id = Uuid::new_v4();
        let now = Utc::now();
        let claims = Claims::new_access_token(user_id, "a@example.com", JWT_ISSUER, now, 60);

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.email, "a@example.com");
        assert_eq!(claims.iss, JWT_ISSUER);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.expires_in(now), 3600);
    }

    #[test]
    fn test_unique_jti() {
        let now = Utc::now();
        let a = Claims::new_access_token(Uuid::new_v4(), "a@example.com", JWT_ISSUER, now, 60);
        let b = Claims::new_access_token(Uuid::new_v4(), "a@example.com", JWT_ISSUER, now, 60);
        assert_ne!(a.jti, b.jti);
    }
}
