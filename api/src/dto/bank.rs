use chrono::{DateTime, Utc};
use mb_core::domain::entities::Account;
use mb_core::domain::value_objects::AccountNumber;
use mb_core::services::{ChangePassword, NewAccount};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validate_password;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OpenAccountRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email, length(max = 255))]
    pub email: String,

    #[serde(alias = "no_telp")]
    #[validate(length(min = 11, max = 32))]
    pub phone: String,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub initial_balance: i64,

    #[validate(custom = "validate_password")]
    pub password: String,

    #[validate(length(min = 1))]
    pub password_confirm: String,
}

impl From<OpenAccountRequest> for NewAccount {
    fn from(request: OpenAccountRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            phone: request.phone,
            initial_balance: request.initial_balance,
            password: request.password,
            password_confirm: request.password_confirm,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub password_old: String,

    #[validate(custom = "validate_password")]
    pub password_new: String,

    #[validate(length(min = 1))]
    pub password_confirm: String,
}

impl From<ChangePasswordRequest> for ChangePassword {
    fn from(request: ChangePasswordRequest) -> Self {
        Self {
            password_old: request.password_old,
            password_new: request.password_new,
            password_confirm: request.password_confirm,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub account_number: AccountNumber,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            account_number: account.account_number,
            name: account.name,
            email: account.email,
            phone: account.phone,
            balance: account.balance,
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceQuery {
    pub account_number: AccountNumber,
}

/// Deposit or payment body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AmountRequest {
    pub account_number: AccountNumber,

    #[serde(alias = "deposit", alias = "pay")]
    #[validate(range(min = 1))]
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TransferRequest {
    #[serde(alias = "source_bank")]
    pub source_account: AccountNumber,

    #[serde(alias = "target_bank")]
    pub target_account: AccountNumber,

    #[serde(alias = "nominal")]
    #[validate(range(min = 1))]
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub account_number: AccountNumber,
    pub balance: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferResponse {
    pub source_account: AccountNumber,
    pub source_balance: i64,
    pub target_account: AccountNumber,
    pub target_balance: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_account_accepts_no_telp_alias() {
        let request: OpenAccountRequest = serde_json::from_value(serde_json::json!({
            "name": "Budi",
            "email": "budi@example.com",
            "no_telp": "081234567890",
            "password": "Secr3t!",
            "password_confirm": "Secr3t!"
        }))
        .unwrap();

        assert_eq!(request.phone, "081234567890");
        assert_eq!(request.initial_balance, 0);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_open_account_rejects_short_phone_and_weak_password() {
        let request = OpenAccountRequest {
            name: "Budi".to_string(),
            email: "budi@example.com".to_string(),
            phone: "0812".to_string(),
            initial_balance: -1,
            password: "weak".to_string(),
            password_confirm: "weak".to_string(),
        };

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("initial_balance"));
    }

    #[test]
    fn test_amount_request_aliases_and_positive_amount() {
        let deposit: AmountRequest = serde_json::from_value(serde_json::json!({
            "account_number": "0000000042",
            "deposit": 0
        }))
        .unwrap();

        assert_eq!(deposit.account_number.as_str(), "0000000042");
        assert!(deposit.validate().is_err());
    }

    #[test]
    fn test_malformed_account_number_fails_deserialization() {
        let result: Result<BalanceQuery, _> =
            serde_json::from_value(serde_json::json!({ "account_number": "12ab" }));
        assert!(result.is_err());
    }
}
