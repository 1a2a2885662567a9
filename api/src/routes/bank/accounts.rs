use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use mb_core::repositories::AccountRepository;
use mb_core::services::{AccountService, PasswordHasher};
use mb_shared::{PaginatedResponse, Pagination};

use crate::dto::bank::{AccountResponse, ChangePasswordRequest, OpenAccountRequest};
use crate::dto::user::IdResponse;
use crate::handlers::{handle_domain_error, validation_error};

/// Handler for GET /api/v1/bank?page=&per_page=
pub async fn list_accounts<A, H>(
    account_service: web::Data<AccountService<A, H>>,
    query: web::Query<Pagination>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    H: PasswordHasher + 'static,
{
    let pagination = query.into_inner().validate();

    match account_service.list(&pagination).await {
        Ok((accounts, total)) => {
            let data = accounts.into_iter().map(AccountResponse::from).collect();
            HttpResponse::Ok().json(PaginatedResponse::new(data, pagination, total))
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/bank
///
/// Opens an account under a freshly generated ten digit account number.
///
/// # Errors
/// - 400 `PASSWORD_MISMATCH` / `VALIDATION_ERROR`
/// - 409 `CONFLICT` with `details.field` set to `email` or `phone`
pub async fn open_account<A, H>(
    account_service: web::Data<AccountService<A, H>>,
    request: web::Json<OpenAccountRequest>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    H: PasswordHasher + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }

    match account_service.open_account(request.into_inner().into()).await {
        Ok(account) => HttpResponse::Created().json(AccountResponse::from(account)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/v1/bank/{id}
pub async fn get_account<A, H>(
    account_service: web::Data<AccountService<A, H>>,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    H: PasswordHasher + 'static,
{
    match account_service.get(path.into_inner()).await {
        Ok(account) => HttpResponse::Ok().json(AccountResponse::from(account)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for DELETE /api/v1/bank/{id}
pub async fn delete_account<A, H>(
    account_service: web::Data<AccountService<A, H>>,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    H: PasswordHasher + 'static,
{
    let id = path.into_inner();

    match account_service.delete(id).await {
        Ok(()) => HttpResponse::Ok().json(IdResponse { id }),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/bank/{id}/change-password
///
/// # Errors
/// - 400 `PASSWORD_MISMATCH` when `password_confirm` differs from `password_new`
/// - 401 `INVALID_CREDENTIALS` when `password_old` is wrong
/// - 404 `NOT_FOUND` for an unknown account
pub async fn change_password<A, H>(
    account_service: web::Data<AccountService<A, H>>,
    path: web::Path<Uuid>,
    request: web::Json<ChangePasswordRequest>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    H: PasswordHasher + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }
    let id = path.into_inner();

    match account_service
        .change_password(id, request.into_inner().into())
        .await
    {
        Ok(()) => HttpResponse::Ok().json(IdResponse { id }),
        Err(error) => handle_domain_error(error),
    }
}
