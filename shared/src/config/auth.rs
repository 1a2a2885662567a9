//! Authentication configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// JWT issuance configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// HS256 secret used to sign access tokens
    pub jwt_secret: String,

    /// Access token lifetime in minutes
    pub token_expiry_minutes: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// bcrypt cost factor for password hashes
    #[serde(default = "default_password_hash_cost")]
    pub password_hash_cost: u32,

    /// Operator created at startup when no user has its email yet
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// First operator account, so a fresh deployment can log in
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BootstrapAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from(DEFAULT_SECRET),
            token_expiry_minutes: 60,
            issuer: String::from("minibank"),
            password_hash_cost: default_password_hash_cost(),
            bootstrap_admin: None,
        }
    }
}

impl AuthConfig {
    /// Create a new configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_SECRET
    }
}

fn default_password_hash_cost() -> u32 {
    12
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_secret_detection() {
        assert!(AuthConfig::default().is_using_default_secret());
        assert!(!AuthConfig::new("s3cret").is_using_default_secret());
    }
}
