//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::MySqlPool;
use uuid::Uuid;

use chrono::Utc;
use mb_core::domain::entities::User;
use mb_core::domain::value_objects::{UserField, UserListQuery};
use mb_core::errors::DomainError;
use mb_core::repositories::UserRepository;
use mb_shared::Pagination;

use super::{column, insert_error, parse_uuid, query_error};

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = column(row, "id")?;

        Ok(User {
            id: parse_uuid(&id)?,
            name: column(row, "name")?,
            email: column(row, "email")?,
            password_hash: column(row, "password_hash")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }
}

/// `WHERE` and `ORDER BY` clauses for a list query
///
/// Column names come from `UserField`, never from the request; the search
/// value is left as the single `?` placeholder.
fn list_clauses(query: &UserListQuery) -> (String, String) {
    let filter = match &query.search {
        Some(search) => format!("WHERE {} = ?", search.field.column()),
        None => String::new(),
    };
    let mut order = format!(
        "ORDER BY {} {}",
        query.sort.field.column(),
        query.sort.direction.as_sql()
    );
    if query.sort.field != UserField::Id {
        order.push_str(", id ASC");
    }
    (filter, order)
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to find user", e))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to find user", e))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn list(
        &self,
        query: &UserListQuery,
        pagination: &Pagination,
    ) -> Result<(Vec<User>, u64), DomainError> {
        let (filter, order) = list_clauses(query);
        let search_value = query.search.as_ref().map(|search| search.value.as_str());

        let select = format!(
            "SELECT id, name, email, password_hash, created_at, updated_at \
             FROM users {} {} LIMIT ? OFFSET ?",
            filter, order
        );
        let mut rows_query = sqlx::query(&select);
        if let Some(value) = search_value {
            rows_query = rows_query.bind(value);
        }
        let rows = rows_query
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("Failed to list users", e))?;

        let users = rows
            .iter()
            .map(Self::row_to_user)
            .collect::<Result<Vec<_>, _>>()?;

        let count = format!("SELECT COUNT(*) AS total FROM users {}", filter);
        let mut count_query = sqlx::query(&count);
        if let Some(value) = search_value {
            count_query = count_query.bind(value);
        }
        let count_row = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error("Failed to count users", e))?;
        let total: i64 = column(&count_row, "total")?;

        Ok((users, total.max(0) as u64))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| insert_error("Failed to create user", e, &["email"]))?;

        Ok(user)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: &str,
        email: &str,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE users
            SET name = ?, email = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(name)
            .bind(email)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| insert_error("Failed to update user", e, &["email"]))?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE users
            SET password_hash = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(password_hash)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to update password", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_list_clauses() {
        let (filter, order) = list_clauses(&UserListQuery::default());
        assert_eq!(filter, "");
        assert_eq!(order, "ORDER BY email ASC, id ASC");
    }

    #[test]
    fn test_search_and_sort_clauses() {
        let query = UserListQuery::parse(Some("name:Budi"), Some("id:desc")).unwrap();
        let (filter, order) = list_clauses(&query);
        assert_eq!(filter, "WHERE name = ?");
        assert_eq!(order, "ORDER BY id DESC");
    }
}
