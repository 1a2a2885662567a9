//! Conversion of domain and request errors into HTTP responses.
//!
//! Every error body is a `mb_shared::ErrorResponse`.

use actix_web::{error::InternalError, http::StatusCode, HttpRequest, HttpResponse};
use mb_core::errors::{AuthError, DomainError, LedgerError};
use mb_shared::{error_codes, ErrorResponse};
use validator::ValidationErrors;

/// Map a domain error to its HTTP status and error body
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let (status, body) = match &error {
        DomainError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone()),
        ),
        DomainError::NotFound { resource } => (
            StatusCode::NOT_FOUND,
            ErrorResponse::new(error_codes::NOT_FOUND, format!("{} not found", resource)),
        ),
        DomainError::Conflict { field } => (
            StatusCode::CONFLICT,
            ErrorResponse::new(
                error_codes::CONFLICT,
                format!("{} is already registered", field),
            )
            .add_detail("field", field),
        ),
        DomainError::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(error_codes::UNAUTHORIZED, "Authentication required"),
        ),
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(error_codes::INVALID_CREDENTIALS, "Invalid email or password"),
            ),
            AuthError::PasswordMismatch => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(
                    error_codes::PASSWORD_MISMATCH,
                    "Password confirmation does not match",
                ),
            ),
            AuthError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(error_codes::TOKEN_EXPIRED, "Token has expired"),
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(error_codes::TOKEN_INVALID, "Invalid token"),
            ),
        },
        DomainError::Ledger(ledger_error) => match ledger_error {
            LedgerError::InvalidAmount
            | LedgerError::SameAccountTransfer
            | LedgerError::BalanceOverflow => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(error_codes::VALIDATION_ERROR, ledger_error.to_string()),
            ),
            LedgerError::ConcurrentModification => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::new(
                    error_codes::CONCURRENT_MODIFICATION,
                    "The account is busy, please retry",
                ),
            ),
            LedgerError::AccountNumberExhausted => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::new(
                    error_codes::SERVICE_UNAVAILABLE,
                    "No account number available, please retry",
                ),
            ),
        },
        DomainError::Infrastructure { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred"),
        ),
    };

    if status.is_server_error() {
        tracing::error!(error = %error, status = status.as_u16(), "Request failed");
    } else {
        tracing::debug!(error = %error, status = status.as_u16(), "Request rejected");
    }

    HttpResponse::build(status).json(body)
}

/// 400 response listing every field that failed validation
pub fn validation_error(errors: &ValidationErrors) -> HttpResponse {
    let mut body = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Request validation failed");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        body = body.add_detail(field, messages);
    }

    HttpResponse::BadRequest().json(body)
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message))
}

/// `JsonConfig` error handler so malformed bodies use the error envelope
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let response = bad_request(format!("Invalid JSON body: {}", err));
    InternalError::from_response(err, response).into()
}

/// `QueryConfig` error handler so malformed query strings use the error envelope
pub fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let response = bad_request(format!("Invalid query string: {}", err));
    InternalError::from_response(err, response).into()
}

/// `PathConfig` error handler, e.g. a malformed `{id}` segment
pub fn path_error_handler(
    err: actix_web::error::PathError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let response = bad_request(format!("Invalid path parameter: {}", err));
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(error: DomainError) -> StatusCode {
        handle_domain_error(error).status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(DomainError::validation("bad")), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(DomainError::not_found("Account")), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(DomainError::Conflict {
                field: "email".to_string()
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AuthError::InvalidCredentials.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AuthError::PasswordMismatch.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(LedgerError::SameAccountTransfer.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(LedgerError::ConcurrentModification.into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(DomainError::infrastructure("pool timed out")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
