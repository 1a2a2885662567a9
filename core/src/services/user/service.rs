//! User management service

use std::sync::Arc;

use mb_shared::validation::{check_password_strength, mask_email};
use mb_shared::Pagination;
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::domain::value_objects::UserListQuery;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::account::ChangePassword;
use crate::services::auth::normalize_email;
use crate::services::password::PasswordHasher;

/// Input for creating an operator user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Replacement profile for an existing user
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub name: String,
    pub email: String,
}

pub struct UserService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> UserService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }

    pub async fn list(
        &self,
        query: &UserListQuery,
        pagination: &Pagination,
    ) -> DomainResult<(Vec<User>, u64)> {
        self.users.list(query, pagination).await
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    pub async fn create(&self, input: NewUser) -> DomainResult<User> {
        if input.password != input.password_confirm {
            return Err(AuthError::PasswordMismatch.into());
        }
        check_password_strength(&input.password)
            .map_err(|rule| DomainError::validation(rule.message()))?;

        let email = normalize_email(&input.email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict {
                field: "email".to_string(),
            });
        }

        let password_hash = self.hasher.hash(&input.password).await?;
        let user = self
            .users
            .create(User::new(input.name.trim().to_string(), email, password_hash))
            .await?;

        info!(user_id = %user.id, email = %mask_email(&user.email), "User created");
        Ok(user)
    }

    /// Replace name and email; the email stays unique across users
    pub async fn update(&self, id: Uuid, input: UpdateUser) -> DomainResult<User> {
        let email = normalize_email(&input.email);
        if let Some(owner) = self.users.find_by_email(&email).await? {
            if owner.id != id {
                return Err(DomainError::Conflict {
                    field: "email".to_string(),
                });
            }
        }

        if !self
            .users
            .update_profile(id, input.name.trim(), &email)
            .await?
        {
            return Err(DomainError::not_found("User"));
        }
        info!(user_id = %id, email = %mask_email(&email), "User updated");
        self.get(id).await
    }

    /// Change a user's password after checking the current one
    pub async fn change_password(&self, id: Uuid, input: ChangePassword) -> DomainResult<()> {
        if input.password_new != input.password_confirm {
            return Err(AuthError::PasswordMismatch.into());
        }

        let user = self.get(id).await?;
        if !self
            .hasher
            .verify(&input.password_old, &user.password_hash)
            .await?
        {
            info!(user_id = %id, "Password change rejected, wrong current password");
            return Err(AuthError::InvalidCredentials.into());
        }

        check_password_strength(&input.password_new)
            .map_err(|rule| DomainError::validation(rule.message()))?;
        let password_hash = self.hasher.hash(&input.password_new).await?;

        if !self.users.update_password(id, &password_hash).await? {
            return Err(DomainError::not_found("User"));
        }
        info!(user_id = %id, "User password changed");
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if !self.users.delete(id).await? {
            return Err(DomainError::not_found("User"));
        }
        info!(user_id = %id, "User deleted");
        Ok(())
    }
}
