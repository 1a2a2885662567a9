//! Ten digit account number.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Number of decimal digits in an account number
pub const ACCOUNT_NUMBER_LENGTH: usize = 10;

const UPPER_BOUND: u64 = 10_000_000_000;

/// Account number: exactly ten ASCII digits, leading zeros kept
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Validates and wraps a raw account number
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.len() == ACCOUNT_NUMBER_LENGTH && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(value))
        } else {
            Err(DomainError::validation(format!(
                "Account number must be {} digits",
                ACCOUNT_NUMBER_LENGTH
            )))
        }
    }

    /// Draws a uniformly random account number
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let value = rng.gen_range(0..UPPER_BOUND);
        Self(format!("{:010}", value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AccountNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<AccountNumber> for String {
    fn from(value: AccountNumber) -> Self {
        value.0
    }
}

impl AsRef<str> for AccountNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_accepts_ten_digits() {
        assert_eq!(AccountNumber::parse("0000000001").unwrap().as_str(), "0000000001");
        assert!(AccountNumber::parse("123").is_err());
        assert!(AccountNumber::parse("12345678901").is_err());
        assert!(AccountNumber::parse("12345abcde").is_err());
        assert!(AccountNumber::parse("１２３４５６７８９０").is_err());
    }

    #[test]
    fn test_random_is_always_ten_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let number = AccountNumber::random(&mut rng);
            assert_eq!(number.as_str().len(), ACCOUNT_NUMBER_LENGTH);
            assert!(number.as_str().bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_serde_validates() {
        let number: AccountNumber = serde_json::from_str("\"0123456789\"").unwrap();
        assert_eq!(number.to_string(), "0123456789");
        assert!(serde_json::from_str::<AccountNumber>("\"42\"").is_err());
    }
}
