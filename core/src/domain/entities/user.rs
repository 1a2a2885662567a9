//! User entity representing an operator who logs in to the bank back office.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Login email (unique)
    pub email: String,

    /// Bcrypt password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the display name and login email
    pub fn set_profile(&mut self, name: String, email: String) {
        self.name = name;
        self.email = email;
        self.updated_at = Utc::now();
    }

    /// Replaces the password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_creation() {
        let user = User::new(
            "Admin".to_string(),
            "admin@example.com".to_string(),
            "hash".to_string(),
        );

        assert_eq!(user.name, "Admin");
        assert_eq!(user.email, "admin@example.com");
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_setters_touch_updated_at() {
        let mut user = User::new("A".into(), "a@example.com".into(), "h".into());
        let created = user.updated_at;

        user.set_profile("B".into(), "b@example.com".into());
        user.set_password_hash("h2".into());

        assert_eq!(user.name, "B");
        assert_eq!(user.email, "b@example.com");
        assert_eq!(user.password_hash, "h2");
        assert!(user.updated_at >= created);
        assert_eq!(user.created_at, created);
    }

    #[test]
    fn test_unique_ids() {
        let a = User::new("A".into(), "a@example.com".into(), "h".into());
        let b = User::new("B".into(), "b@example.com".into(), "h".into());
        assert_ne!(a.id, b.id);
    }
}
