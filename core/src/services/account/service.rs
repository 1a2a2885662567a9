//! Main account service implementation

use std::sync::Arc;

use mb_shared::validation::{check_password_strength, mask_email};
use mb_shared::{LedgerConfig, Pagination};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::Account;
use crate::domain::value_objects::AccountNumber;
use crate::errors::{AuthError, DomainError, DomainResult, LedgerError};
use crate::repositories::AccountRepository;
use crate::services::auth::normalize_email;
use crate::services::password::PasswordHasher;

/// Input for opening an account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub initial_balance: i64,
    pub password: String,
    pub password_confirm: String,
}

/// Input for changing an account password
#[derive(Debug, Clone)]
pub struct ChangePassword {
    pub password_old: String,
    pub password_new: String,
    pub password_confirm: String,
}

/// Service for account lifecycle operations
pub struct AccountService<A, H>
where
    A: AccountRepository,
    H: PasswordHasher,
{
    accounts: Arc<A>,
    hasher: Arc<H>,
    config: LedgerConfig,
}

impl<A, H> AccountService<A, H>
where
    A: AccountRepository,
    H: PasswordHasher,
{
    pub fn new(accounts: Arc<A>, hasher: Arc<H>, config: LedgerConfig) -> Self {
        Self {
            accounts,
            hasher,
            config,
        }
    }

    pub async fn list(&self, pagination: &Pagination) -> DomainResult<(Vec<Account>, u64)> {
        self.accounts.list(pagination).await
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Account> {
        self.accounts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Account"))
    }

    pub async fn email_is_registered(&self, email: &str) -> DomainResult<bool> {
        Ok(self
            .accounts
            .find_by_email(&normalize_email(email))
            .await?
            .is_some())
    }

    pub async fn phone_is_registered(&self, phone: &str) -> DomainResult<bool> {
        Ok(self.accounts.find_by_phone(phone.trim()).await?.is_some())
    }

    /// Draw a random account number not yet present in the store
    ///
    /// # Returns
    ///
    /// * `Err(LedgerError::AccountNumberExhausted)` - Every draw collided
    pub async fn generate_account_number(&self) -> DomainResult<AccountNumber> {
        let mut remaining = self.config.max_account_number_attempts;
        match self.draw_free_number(&mut remaining).await? {
            Some(number) => Ok(number),
            None => Err(self.exhausted()),
        }
    }

    /// Open a new account with a freshly generated number
    ///
    /// Draws that collide with a stored number and numbers taken between the
    /// check and the insert both spend the same attempt budget.
    pub async fn open_account(&self, input: NewAccount) -> DomainResult<Account> {
        if input.password != input.password_confirm {
            return Err(AuthError::PasswordMismatch.into());
        }
        check_password_strength(&input.password)
            .map_err(|rule| DomainError::validation(rule.message()))?;
        if input.initial_balance < 0 {
            return Err(DomainError::validation("Initial balance must not be negative"));
        }

        let email = normalize_email(&input.email);
        let phone = input.phone.trim().to_string();
        if self.email_is_registered(&email).await? {
            return Err(DomainError::Conflict {
                field: "email".to_string(),
            });
        }
        if self.phone_is_registered(&phone).await? {
            return Err(DomainError::Conflict {
                field: "phone".to_string(),
            });
        }

        let password_hash = self.hasher.hash(&input.password).await?;

        let mut remaining = self.config.max_account_number_attempts;
        while let Some(account_number) = self.draw_free_number(&mut remaining).await? {
            let mut account = Account::new(
                account_number,
                input.name.trim().to_string(),
                email.clone(),
                phone.clone(),
                password_hash.clone(),
            );
            account.balance = input.initial_balance;

            match self.accounts.create(account).await {
                Ok(account) => {
                    info!(
                        account_id = %account.id,
                        account_number = %account.account_number,
                        email = %mask_email(&account.email),
                        "Account opened"
                    );
                    return Ok(account);
                }
                Err(DomainError::Conflict { field }) if field == "account_number" => {
                    debug!(remaining, "Account number taken on insert, drawing again");
                }
                Err(e) => return Err(e),
            }
        }

        Err(self.exhausted())
    }

    /// Spends one unit of `remaining` per draw; `None` once it runs out
    async fn draw_free_number(&self, remaining: &mut u32) -> DomainResult<Option<AccountNumber>> {
        while *remaining > 0 {
            *remaining -= 1;
            let candidate = draw_account_number();
            if !self.accounts.exists_by_account_number(&candidate).await? {
                return Ok(Some(candidate));
            }
            debug!(remaining = *remaining, "Account number collision, drawing again");
        }
        Ok(None)
    }

    fn exhausted(&self) -> DomainError {
        warn!(
            attempts = self.config.max_account_number_attempts,
            "No free account number found"
        );
        LedgerError::AccountNumberExhausted.into()
    }

    /// Change an account password after checking the current one
    pub async fn change_password(&self, id: Uuid, input: ChangePassword) -> DomainResult<()> {
        if input.password_new != input.password_confirm {
            return Err(AuthError::PasswordMismatch.into());
        }

        let account = self.get(id).await?;
        if !self
            .hasher
            .verify(&input.password_old, &account.password_hash)
            .await?
        {
            info!(account_id = %id, "Password change rejected, wrong current password");
            return Err(AuthError::InvalidCredentials.into());
        }

        check_password_strength(&input.password_new)
            .map_err(|rule| DomainError::validation(rule.message()))?;
        let password_hash = self.hasher.hash(&input.password_new).await?;

        if !self.accounts.update_password(id, &password_hash).await? {
            return Err(DomainError::not_found("Account"));
        }
        info!(account_id = %id, "Account password changed");
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if !self.accounts.delete(id).await? {
            return Err(DomainError::not_found("Account"));
        }
        info!(account_id = %id, "Account deleted");
        Ok(())
    }
}

/// Kept synchronous so the thread-local RNG is never held across an await
fn draw_account_number() -> AccountNumber {
    AccountNumber::random(&mut rand::thread_rng())
}
