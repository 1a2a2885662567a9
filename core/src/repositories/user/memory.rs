//! In-memory implementation of UserRepository

use async_trait::async_trait;
use mb_shared::Pagination;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::domain::value_objects::UserListQuery;
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// In-memory user repository
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn list(
        &self,
        query: &UserListQuery,
        pagination: &Pagination,
    ) -> Result<(Vec<User>, u64), DomainError> {
        let users = self.users.read().await;
        let mut matching: Vec<User> = users
            .values()
            .filter(|u| query.matches(u))
            .cloned()
            .collect();
        matching.sort_by(|a, b| query.sort.compare(a, b));
        Ok((pagination.apply(&matching), matching.len() as u64))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Conflict {
                field: "email".to_string(),
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: &str,
        email: &str,
    ) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.id != id && u.email == email) {
            return Err(DomainError::Conflict {
                field: "email".to_string(),
            });
        }

        match users.get_mut(&id) {
            Some(user) => {
                user.set_profile(name.to_string(), email.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.set_password_hash(password_hash.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        Ok(users.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUserRepository::new();
        let user = User::new("Admin".into(), "admin@x.com".into(), "hash".into());
        repo.create(user.clone()).await.unwrap();

        assert_eq!(repo.find_by_id(user.id).await.unwrap(), Some(user.clone()));
        assert_eq!(repo.find_by_email("admin@x.com").await.unwrap(), Some(user));
        assert!(repo.find_by_email("other@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.create(User::new("A".into(), "a@x.com".into(), "h".into()))
            .await
            .unwrap();
        let result = repo
            .create(User::new("B".into(), "a@x.com".into(), "h".into()))
            .await;
        assert!(matches!(result, Err(DomainError::Conflict { field }) if field == "email"));
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let repo = InMemoryUserRepository::new();
        let a = repo
            .create(User::new("A".into(), "a@x.com".into(), "h".into()))
            .await
            .unwrap();
        repo.create(User::new("B".into(), "b@x.com".into(), "h".into()))
            .await
            .unwrap();

        let (page, total) = repo
            .list(&UserListQuery::default(), &Pagination::default())
            .await
            .unwrap();
        assert_eq!(total, 2);
        assert_eq!(page.len(), 2);

        assert!(repo.delete(a.id).await.unwrap());
        assert!(!repo.delete(a.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_filters_then_sorts_then_pages() {
        let repo = InMemoryUserRepository::new();
        for (name, email) in [
            ("Teller", "c@x.com"),
            ("Teller", "a@x.com"),
            ("Auditor", "b@x.com"),
            ("Teller", "d@x.com"),
        ] {
            repo.create(User::new(name.into(), email.into(), "h".into()))
                .await
                .unwrap();
        }

        let query = UserListQuery::parse(Some("name:teller"), Some("email:desc")).unwrap();
        let (page, total) = repo.list(&query, &Pagination::new(1, 2)).await.unwrap();
        assert_eq!(total, 3);
        let emails: Vec<&str> = page.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, ["d@x.com", "c@x.com"]);

        let (page, _) = repo
            .list(&UserListQuery::default(), &Pagination::default())
            .await
            .unwrap();
        let emails: Vec<&str> = page.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, ["a@x.com", "b@x.com", "c@x.com", "d@x.com"]);
    }

    #[tokio::test]
    async fn test_update_profile_and_password() {
        let repo = InMemoryUserRepository::new();
        let a = repo
            .create(User::new("A".into(), "a@x.com".into(), "h".into()))
            .await
            .unwrap();
        repo.create(User::new("B".into(), "b@x.com".into(), "h".into()))
            .await
            .unwrap();

        let result = repo.update_profile(a.id, "A", "b@x.com").await;
        assert!(matches!(result, Err(DomainError::Conflict { field }) if field == "email"));

        // Keeping your own email is not a conflict
        assert!(repo.update_profile(a.id, "Alpha", "a@x.com").await.unwrap());
        assert!(repo.update_password(a.id, "h2").await.unwrap());

        let stored = repo.find_by_id(a.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Alpha");
        assert_eq!(stored.password_hash, "h2");

        assert!(!repo.update_profile(Uuid::new_v4(), "X", "x@x.com").await.unwrap());
        assert!(!repo.update_password(Uuid::new_v4(), "h").await.unwrap());
    }
}
