//! Main token service implementation

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mb_shared::AuthConfig;
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::errors::{AuthError, DomainError, DomainResult};

/// Service issuing and verifying JWT access tokens
pub struct TokenService {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service signing with the configured secret
    pub fn new(config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.validate_exp = true;
        validation.validate_aud = false;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Access token lifetime in seconds
    pub fn expires_in(&self) -> i64 {
        self.config.token_expiry_minutes * 60
    }

    /// Issues an access token for a user
    pub fn issue(&self, user_id: Uuid, email: &str) -> DomainResult<String> {
        let claims = Claims::new_access_token(
            user_id,
            email,
            self.config.issuer.as_str(),
            Utc::now(),
            self.config.token_expiry_minutes,
        );
        self.encode_jwt(&claims)
    }

    pub(crate) fn encode_jwt(&self, claims: &Claims) -> DomainResult<String> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key)
            .map_err(|e| DomainError::infrastructure(format!("Token generation failed: {}", e)))
    }

    /// Verifies an access token and returns the claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(AuthError::TokenExpired)` - Signature valid but `exp` has passed
    /// * `Err(AuthError::InvalidToken)` - Anything else
    pub fn verify(&self, token: &str) -> DomainResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Auth(AuthError::TokenExpired),
                _ => DomainError::Auth(AuthError::InvalidToken),
            })?;

        Ok(token_data.claims)
    }
}
