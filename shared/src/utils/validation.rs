//! Common validation and masking helpers

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

static KEY_VALUE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^:]+):(.*)$").expect("key-value pattern is valid"));

pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const PASSWORD_MAX_LENGTH: usize = 32;
pub const PHONE_MIN_LENGTH: usize = 11;

/// Reasons a password is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    Length,
    Lowercase,
    Uppercase,
    Digit,
    Special,
    Whitespace,
    NonLatin,
}

impl PasswordRule {
    pub fn message(&self) -> &'static str {
        match self {
            PasswordRule::Length => "Password must be between 6 and 32 characters",
            PasswordRule::Lowercase => "Password must contain a lowercase letter",
            PasswordRule::Uppercase => "Password must contain an uppercase letter",
            PasswordRule::Digit => "Password must contain a digit",
            PasswordRule::Special => "Password must contain a special character",
            PasswordRule::Whitespace => "Password must not contain whitespace",
            PasswordRule::NonLatin => "Password must contain Latin characters only",
        }
    }
}

/// Check password strength, returning the first rule that fails
pub fn check_password_strength(password: &str) -> Result<(), PasswordRule> {
    let length = password.chars().count();
    if !(PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&length) {
        return Err(PasswordRule::Length);
    }
    if password.chars().any(char::is_whitespace) {
        return Err(PasswordRule::Whitespace);
    }
    if !password.is_ascii() {
        return Err(PasswordRule::NonLatin);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PasswordRule::Lowercase);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordRule::Uppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordRule::Digit);
    }
    if !password.chars().any(|c| c.is_ascii_punctuation()) {
        return Err(PasswordRule::Special);
    }
    Ok(())
}

/// Basic structural email check
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Phone numbers are free-form but must carry at least 11 characters
pub fn is_valid_phone(phone: &str) -> bool {
    phone.trim().chars().count() >= PHONE_MIN_LENGTH
}

/// Split a `key:value` query parameter at the first colon, trimming both sides
pub fn split_key_value(input: &str) -> Option<(&str, &str)> {
    let captures = KEY_VALUE_REGEX.captures(input)?;
    let key = captures.get(1)?.as_str().trim();
    let value = captures.get(2)?.as_str().trim();
    Some((key, value))
}

/// Mask an email for log output: `jdoe@example.com` -> `j***@example.com`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => String::from("***"),
    }
}
