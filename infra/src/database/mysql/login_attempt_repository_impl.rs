//! MySQL implementation of the LoginAttemptRepository trait.

use async_trait::async_trait;
use sqlx::MySqlPool;

use mb_core::domain::entities::LoginAttemptRecord;
use mb_core::errors::DomainError;
use mb_core::repositories::LoginAttemptRepository;

use super::{column, query_error};

/// MySQL implementation of LoginAttemptRepository
pub struct MySqlLoginAttemptRepository {
    pool: MySqlPool,
}

impl MySqlLoginAttemptRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<LoginAttemptRecord, DomainError> {
        Ok(LoginAttemptRecord {
            email: column(row, "email")?,
            last_login_at: column(row, "last_login_at")?,
            attempts: column(row, "attempts")?,
            version: column(row, "version")?,
        })
    }
}

#[async_trait]
impl LoginAttemptRepository for MySqlLoginAttemptRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<LoginAttemptRecord>, DomainError> {
        let query = r#"
            SELECT email, last_login_at, attempts, version
            FROM login_attempts
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to find login attempts", e))?;

        result.as_ref().map(Self::row_to_record).transpose()
    }

    async fn create(&self, record: LoginAttemptRecord) -> Result<LoginAttemptRecord, DomainError> {
        // A concurrent first attempt may have inserted the row already; keep theirs.
        // The no-op update leaves other errors, such as an oversized email, to surface.
        let query = r#"
            INSERT INTO login_attempts (email, last_login_at, attempts, version)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE email = email
        "#;

        sqlx::query(query)
            .bind(&record.email)
            .bind(record.last_login_at)
            .bind(record.attempts)
            .bind(record.version)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to create login attempts", e))?;

        self.find_by_email(&record.email)
            .await?
            .ok_or_else(|| DomainError::infrastructure("Login attempt record vanished after insert"))
    }

    async fn compare_and_swap(
        &self,
        record: &LoginAttemptRecord,
        expected_version: i64,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE login_attempts
            SET last_login_at = ?, attempts = ?, version = ?
            WHERE email = ? AND version = ?
        "#;

        let result = sqlx::query(query)
            .bind(record.last_login_at)
            .bind(record.attempts)
            .bind(expected_version + 1)
            .bind(&record.email)
            .bind(expected_version)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to update login attempts", e))?;

        Ok(result.rows_affected() == 1)
    }
}
