//! User repository trait defining the interface for user data persistence.

use async_trait::async_trait;
use mb_shared::Pagination;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::domain::value_objects::UserListQuery;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by login email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// List users matching the query's search in its sort order
    ///
    /// The total counts every matching user, not just the returned page.
    async fn list(
        &self,
        query: &UserListQuery,
        pagination: &Pagination,
    ) -> Result<(Vec<User>, u64), DomainError>;

    /// Create a new user in the repository
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Conflict)` - Email already registered
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace a user's display name and login email
    ///
    /// # Returns
    /// * `Ok(false)` - No user with this id
    /// * `Err(DomainError::Conflict)` - Email belongs to another user
    async fn update_profile(
        &self,
        id: Uuid,
        name: &str,
        email: &str,
    ) -> Result<bool, DomainError>;

    /// Replace the password hash
    ///
    /// # Returns
    /// * `Ok(false)` - No user with this id
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DomainError>;

    /// Delete a user from the repository
    ///
    /// # Returns
    /// * `Ok(true)` - User was deleted
    /// * `Ok(false)` - User not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
