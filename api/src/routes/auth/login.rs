use actix_web::{web, HttpResponse};
use validator::Validate;

use mb_core::domain::value_objects::LoginResult;
use mb_core::repositories::{LoginAttemptRepository, UserRepository};
use mb_core::services::{AuthService, Clock, PasswordHasher, TokenService};
use mb_shared::{error_codes, ErrorResponse};

use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::handlers::{handle_domain_error, validation_error};

/// Handler for POST /api/v1/auth/login
///
/// # Request Body
///
/// ```json
/// { "email": "admin@example.com", "password": "Secr3t!" }
/// ```
///
/// # Response
///
/// - 200 OK: `{ user_id, email, name, token, token_type, expires_in }`
/// - 401 Unauthorized: `INVALID_CREDENTIALS`, `details.attempts_remaining`
///   when the throttle counted the failure
/// - 403 Forbidden: `ACCOUNT_LOCKED`, `details.minutes_remaining`
pub async fn login<U, L, H, C>(
    auth_service: web::Data<AuthService<U, L, H, C>>,
    token_service: web::Data<TokenService>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: LoginAttemptRepository + 'static,
    H: PasswordHasher + 'static,
    C: Clock + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }

    match auth_service.login(&request.email, &request.password).await {
        Ok(LoginResult::Success {
            user_id,
            email,
            name,
            token,
        }) => HttpResponse::Ok().json(LoginResponse {
            user_id,
            email,
            name,
            token,
            token_type: "Bearer".to_string(),
            expires_in: token_service.expires_in(),
        }),
        Ok(LoginResult::Denied { attempts_remaining }) => HttpResponse::Unauthorized().json(
            ErrorResponse::new(
                error_codes::INVALID_CREDENTIALS,
                format!(
                    "Invalid email or password. Attempts remaining: {}",
                    attempts_remaining
                ),
            )
            .add_detail("attempts_remaining", attempts_remaining),
        ),
        Ok(LoginResult::Locked { minutes_remaining }) => {
            let minutes = minutes_remaining.max(0.0).floor() as u64;
            HttpResponse::Forbidden().json(
                ErrorResponse::new(
                    error_codes::ACCOUNT_LOCKED,
                    format!(
                        "Too many failed login attempts. Time remaining: {} minutes",
                        minutes
                    ),
                )
                .add_detail("minutes_remaining", minutes),
            )
        }
        Err(error) => handle_domain_error(error),
    }
}
