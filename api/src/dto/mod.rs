//! Request and response bodies

pub mod auth;
pub mod bank;
pub mod user;

use std::borrow::Cow;

use mb_shared::validation::check_password_strength;
use validator::ValidationError;

/// `validator` hook applying the shared password strength rules
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    check_password_strength(password).map_err(|rule| {
        let mut error = ValidationError::new("password_strength");
        error.message = Some(Cow::Borrowed(rule.message()));
        error
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_reports_rule() {
        assert!(validate_password("Secr3t!").is_ok());

        let error = validate_password("secret").unwrap_err();
        assert_eq!(error.code, "password_strength");
        assert!(error.message.is_some());
    }
}
