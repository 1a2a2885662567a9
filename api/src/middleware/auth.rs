//! JWT authentication middleware for protecting API endpoints.
//!
//! Extracts the Bearer token from the Authorization header, verifies it with
//! the core `TokenService` and injects an [`AuthContext`] into the request.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use mb_core::{
    domain::entities::Claims,
    errors::{AuthError, DomainError},
    services::TokenService,
};
use mb_shared::{error_codes, ErrorResponse};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};
use uuid::Uuid;

/// Authenticated operator injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID extracted from JWT claims
    pub user_id: Uuid,
    pub email: String,
    /// JWT ID for tracking
    pub jti: String,
}

impl AuthContext {
    /// Creates a new authentication context from JWT claims
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Auth(AuthError::InvalidToken))?;
        Ok(Self {
            user_id,
            email: claims.email,
            jti: claims.jti,
        })
    }
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    token_service: Arc<TokenService>,
}

impl JwtAuth {
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token_service = Arc::clone(&self.token_service);

        Box::pin(async move {
            let auth_context = match extract_bearer_token(&req) {
                None => Err(ErrorResponse::new(
                    error_codes::UNAUTHORIZED,
                    "Missing or invalid Authorization header",
                )),
                Some(token) => token_service
                    .verify(&token)
                    .and_then(AuthContext::from_claims)
                    .map_err(rejection),
            };

            match auth_context {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    let response = service.call(req).await?;
                    Ok(response.map_into_left_body())
                }
                Err(body) => {
                    tracing::debug!(error = %body.error, path = %req.path(), "Rejected request");
                    let response = HttpResponse::Unauthorized().json(body);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

fn rejection(error: DomainError) -> ErrorResponse {
    match error {
        DomainError::Auth(AuthError::TokenExpired) => {
            ErrorResponse::new(error_codes::TOKEN_EXPIRED, "Token has expired")
        }
        _ => ErrorResponse::new(error_codes::TOKEN_INVALID, "Invalid token"),
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}
