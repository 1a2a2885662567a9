//! Application state and factory
//!
//! This module handles the initialization of the application state
//! and provides the factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use mb_core::repositories::{AccountRepository, LoginAttemptRepository, UserRepository};
use mb_core::services::{
    AccountService, AuthService, Clock, LedgerService, LoginThrottle, PasswordHasher,
    TokenService, UserService,
};
use mb_infra::DatabasePool;
use mb_shared::{error_codes, AppConfig, ErrorResponse, StorageBackend};

use crate::handlers::{json_error_handler, path_error_handler, query_error_handler};
use crate::middleware::{create_cors, JwtAuth};
use crate::routes::{auth, bank, health, users};

/// Services shared by all workers
pub struct AppState<U, L, A, H, C>
where
    U: UserRepository,
    L: LoginAttemptRepository,
    A: AccountRepository,
    H: PasswordHasher,
    C: Clock,
{
    pub auth_service: Arc<AuthService<U, L, H, C>>,
    pub user_service: Arc<UserService<U, H>>,
    pub account_service: Arc<AccountService<A, H>>,
    pub ledger_service: Arc<LedgerService<A>>,
    pub token_service: Arc<TokenService>,
    pub health: Arc<health::HealthState>,
}

impl<U, L, A, H, C> AppState<U, L, A, H, C>
where
    U: UserRepository,
    L: LoginAttemptRepository,
    A: AccountRepository,
    H: PasswordHasher,
    C: Clock,
{
    /// Wire every service from its repositories and the loaded configuration
    pub fn new(
        users: Arc<U>,
        login_attempts: Arc<L>,
        accounts: Arc<A>,
        hasher: Arc<H>,
        clock: Arc<C>,
        config: &AppConfig,
    ) -> Self {
        let token_service = Arc::new(TokenService::new(config.auth.clone()));
        let throttle = Arc::new(LoginThrottle::new(
            login_attempts,
            clock,
            config.throttle.clone(),
        ));

        Self {
            auth_service: Arc::new(AuthService::new(
                Arc::clone(&users),
                throttle,
                Arc::clone(&hasher),
                Arc::clone(&token_service),
            )),
            user_service: Arc::new(UserService::new(users, Arc::clone(&hasher))),
            account_service: Arc::new(AccountService::new(
                Arc::clone(&accounts),
                hasher,
                config.ledger.clone(),
            )),
            ledger_service: Arc::new(LedgerService::new(accounts, config.ledger.clone())),
            token_service,
            health: Arc::new(health::HealthState::new(config.storage.backend, None)),
        }
    }

    /// Attach the MySQL pool so `/health` checks connectivity
    pub fn with_database(mut self, pool: DatabasePool) -> Self {
        self.health = Arc::new(health::HealthState::new(StorageBackend::MySql, Some(pool)));
        self
    }
}

impl<U, L, A, H, C> Clone for AppState<U, L, A, H, C>
where
    U: UserRepository,
    L: LoginAttemptRepository,
    A: AccountRepository,
    H: PasswordHasher,
    C: Clock,
{
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            user_service: Arc::clone(&self.user_service),
            account_service: Arc::clone(&self.account_service),
            ledger_service: Arc::clone(&self.ledger_service),
            token_service: Arc::clone(&self.token_service),
            health: Arc::clone(&self.health),
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<U, L, A, H, C>(
    state: AppState<U, L, A, H, C>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    L: LoginAttemptRepository + 'static,
    A: AccountRepository + 'static,
    H: PasswordHasher + 'static,
    C: Clock + 'static,
{
    let cors = create_cors(config.environment, &config.server);
    let jwt = JwtAuth::new(Arc::clone(&state.token_service));

    App::new()
        .app_data(
            web::JsonConfig::default()
                .limit(config.server.max_payload_size)
                .error_handler(json_error_handler),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::Data::from(state.auth_service))
        .app_data(web::Data::from(state.user_service))
        .app_data(web::Data::from(state.account_service))
        .app_data(web::Data::from(state.ledger_service))
        .app_data(web::Data::from(state.token_service))
        .app_data(web::Data::from(state.health))
        // Registered last runs first: request span, then CORS
        .wrap(cors)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(auth::login::<U, L, H, C>)),
                )
                .service(
                    web::scope("/users")
                        .wrap(jwt.clone())
                        .route("", web::get().to(users::list_users::<U, H>))
                        .route("", web::post().to(users::create_user::<U, H>))
                        .route("/{id}", web::get().to(users::get_user::<U, H>))
                        .route("/{id}", web::put().to(users::update_user::<U, H>))
                        .route("/{id}", web::delete().to(users::delete_user::<U, H>))
                        .route(
                            "/{id}/change-password",
                            web::post().to(users::change_password::<U, H>),
                        ),
                )
                .service(
                    web::scope("/bank")
                        .wrap(jwt)
                        // Static segments before `/{id}`
                        .route("/balance", web::get().to(bank::ledger::get_balance::<A>))
                        .route("/deposit", web::put().to(bank::ledger::deposit::<A>))
                        .route("/pay", web::put().to(bank::ledger::pay::<A>))
                        .route("/transfer", web::put().to(bank::ledger::transfer::<A>))
                        .route("", web::get().to(bank::accounts::list_accounts::<A, H>))
                        .route("", web::post().to(bank::accounts::open_account::<A, H>))
                        .route("/{id}", web::get().to(bank::accounts::get_account::<A, H>))
                        .route(
                            "/{id}",
                            web::delete().to(bank::accounts::delete_account::<A, H>),
                        )
                        .route(
                            "/{id}/change-password",
                            web::post().to(bank::accounts::change_password::<A, H>),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
