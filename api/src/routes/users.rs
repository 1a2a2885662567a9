//! Back office user management handlers

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use mb_core::repositories::UserRepository;
use mb_core::services::{PasswordHasher, UserService};
use mb_shared::PaginatedResponse;

use crate::dto::bank::ChangePasswordRequest;
use crate::dto::user::{
    CreateUserRequest, IdResponse, ListUsersQuery, UpdateUserRequest, UserResponse,
};
use crate::handlers::{handle_domain_error, validation_error};
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/users?page=&per_page=&search=&sort=
pub async fn list_users<U, H>(
    user_service: web::Data<UserService<U, H>>,
    query: web::Query<ListUsersQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let pagination = query.pagination();
    let list_query = match query.to_query() {
        Ok(list_query) => list_query,
        Err(error) => return handle_domain_error(error),
    };

    match user_service.list(&list_query, &pagination).await {
        Ok((users, total)) => {
            let data = users.into_iter().map(UserResponse::from).collect();
            HttpResponse::Ok().json(PaginatedResponse::new(data, pagination, total))
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/users
pub async fn create_user<U, H>(
    user_service: web::Data<UserService<U, H>>,
    auth: AuthContext,
    request: web::Json<CreateUserRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }

    match user_service.create(request.into_inner().into()).await {
        Ok(user) => {
            tracing::info!(created_by = %auth.user_id, user_id = %user.id, "User created");
            HttpResponse::Created().json(UserResponse::from(user))
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/v1/users/{id}
pub async fn get_user<U, H>(
    user_service: web::Data<UserService<U, H>>,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    match user_service.get(path.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(user)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PUT /api/v1/users/{id}
pub async fn update_user<U, H>(
    user_service: web::Data<UserService<U, H>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    request: web::Json<UpdateUserRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }
    let id = path.into_inner();

    match user_service.update(id, request.into_inner().into()).await {
        Ok(user) => {
            tracing::info!(updated_by = %auth.user_id, user_id = %id, "User updated");
            HttpResponse::Ok().json(UserResponse::from(user))
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/users/{id}/change-password
pub async fn change_password<U, H>(
    user_service: web::Data<UserService<U, H>>,
    path: web::Path<Uuid>,
    request: web::Json<ChangePasswordRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }
    let id = path.into_inner();

    match user_service
        .change_password(id, request.into_inner().into())
        .await
    {
        Ok(()) => HttpResponse::Ok().json(IdResponse { id }),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for DELETE /api/v1/users/{id}
pub async fn delete_user<U, H>(
    user_service: web::Data<UserService<U, H>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let id = path.into_inner();

    match user_service.delete(id).await {
        Ok(()) => {
            tracing::info!(deleted_by = %auth.user_id, user_id = %id, "User deleted");
            HttpResponse::Ok().json(IdResponse { id })
        }
        Err(error) => handle_domain_error(error),
    }
}
