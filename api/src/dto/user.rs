use chrono::{DateTime, Utc};
use mb_core::domain::entities::User;
use mb_core::domain::value_objects::UserListQuery;
use mb_core::errors::DomainError;
use mb_core::services::{NewUser, UpdateUser};
use mb_shared::Pagination;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validate_password;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email, length(max = 255))]
    pub email: String,

    #[validate(custom = "validate_password")]
    pub password: String,

    #[validate(length(min = 1))]
    pub password_confirm: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            password: request.password,
            password_confirm: request.password_confirm,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email, length(max = 255))]
    pub email: String,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
        }
    }
}

/// `GET /users` parameters: paging plus `search=field:value` and
/// `sort=field:asc|desc`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl ListUsersQuery {
    pub fn pagination(&self) -> Pagination {
        let defaults = Pagination::default();
        Pagination::new(
            self.page.unwrap_or(defaults.page),
            self.per_page.unwrap_or(defaults.per_page),
        )
    }

    pub fn to_query(&self) -> Result<UserListQuery, DomainError> {
        UserListQuery::parse(self.search.as_deref(), self.sort.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Body returned by delete and password-change endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::web;

    #[test]
    fn test_list_query_defaults_and_clamps() {
        let query = web::Query::<ListUsersQuery>::from_query("per_page=500&sort=name:desc")
            .unwrap()
            .into_inner();
        let pagination = query.pagination();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.per_page, 100);
        assert!(query.to_query().unwrap().search.is_none());

        let query = ListUsersQuery {
            search: Some("phone:0812".to_string()),
            ..Default::default()
        };
        assert!(query.to_query().is_err());
    }

    #[test]
    fn test_update_request_caps_email_length() {
        let label = "d".repeat(60);
        let request = UpdateUserRequest {
            name: "Sari".to_string(),
            email: format!("{}@{}.{}.{}.{}.com", "a".repeat(64), label, label, label, label),
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        let email_errors = fields["email"];
        assert_eq!(email_errors.len(), 1);
        assert_eq!(email_errors[0].code, "length");
    }
}
