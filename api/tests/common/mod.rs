//! Shared fixtures for API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::http::header;
use mb_api::AppState;
use mb_core::domain::entities::User;
use mb_core::repositories::{
    InMemoryAccountRepository, InMemoryLoginAttemptRepository, InMemoryUserRepository,
};
use mb_core::services::{NewUser, SystemClock};
use mb_infra::BcryptPasswordHasher;
use mb_shared::{AppConfig, AuthConfig, Environment};

pub const ADMIN_NAME: &str = "Back Office";
pub const ADMIN_EMAIL: &str = "admin@minibank.test";
pub const ADMIN_PASSWORD: &str = "Adm1n!pass";

pub type TestState = AppState<
    InMemoryUserRepository,
    InMemoryLoginAttemptRepository,
    InMemoryAccountRepository,
    BcryptPasswordHasher,
    SystemClock,
>;

pub struct TestContext {
    pub config: AppConfig,
    pub state: TestState,
    pub admin: User,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_auth(AuthConfig::new("integration-test-secret")).await
    }

    pub async fn with_auth(auth: AuthConfig) -> Self {
        let mut config = AppConfig::for_environment(Environment::Development);
        config.auth = auth;

        // Minimum bcrypt cost keeps the suite fast
        let hasher = Arc::new(BcryptPasswordHasher::new(4).await.expect("hasher"));
        let state = AppState::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryLoginAttemptRepository::new()),
            Arc::new(InMemoryAccountRepository::new()),
            hasher,
            Arc::new(SystemClock),
            &config,
        );

        let admin = state
            .user_service
            .create(NewUser {
                name: ADMIN_NAME.to_string(),
                email: ADMIN_EMAIL.to_string(),
                password: ADMIN_PASSWORD.to_string(),
                password_confirm: ADMIN_PASSWORD.to_string(),
            })
            .await
            .expect("seed admin");

        Self {
            config,
            state,
            admin,
        }
    }

    /// Authorization header carrying a token for the seeded admin
    pub fn bearer(&self) -> (header::HeaderName, String) {
        let token = self
            .state
            .token_service
            .issue(self.admin.id, &self.admin.email)
            .expect("issue token");
        (header::AUTHORIZATION, format!("Bearer {}", token))
    }
}
