use std::sync::Arc;

use actix_web::HttpServer;
use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mb_api::{create_app, AppState};
use mb_core::repositories::{
    AccountRepository, InMemoryAccountRepository, InMemoryLoginAttemptRepository,
    InMemoryUserRepository, LoginAttemptRepository, UserRepository,
};
use mb_core::services::{Clock, NewUser, PasswordHasher, SystemClock};
use mb_core::DomainError;
use mb_infra::{
    BcryptPasswordHasher, DatabasePool, MySqlAccountRepository, MySqlLoginAttemptRepository,
    MySqlUserRepository,
};
use mb_shared::config::LogFormat;
use mb_shared::{AppConfig, Environment, LoggingConfig, StorageBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::load_for(environment).context("failed to load configuration")?;
    init_tracing(&config.logging);

    info!(
        environment = ?config.environment,
        storage = config.storage.backend.as_str(),
        "Starting MiniBank API server"
    );

    if config.auth.is_using_default_secret() {
        if config.environment.is_production() {
            anyhow::bail!("auth.jwt_secret must be set in production");
        }
        warn!("Using the default JWT secret; set MINIBANK_AUTH__JWT_SECRET before deploying");
    }

    let hasher = Arc::new(
        BcryptPasswordHasher::new(config.auth.password_hash_cost)
            .await
            .context("failed to initialise password hasher")?,
    );
    let clock = Arc::new(SystemClock);

    match config.storage.backend {
        StorageBackend::Memory => {
            let state = AppState::new(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryLoginAttemptRepository::new()),
                Arc::new(InMemoryAccountRepository::new()),
                hasher,
                clock,
                &config,
            );
            serve(state, config).await
        }
        StorageBackend::MySql => {
            let pool = DatabasePool::new(&config.database)
                .await
                .context("failed to connect to MySQL")?;
            pool.run_migrations()
                .await
                .context("failed to run database migrations")?;

            let mysql = pool.get_pool().clone();
            let state = AppState::new(
                Arc::new(MySqlUserRepository::new(mysql.clone())),
                Arc::new(MySqlLoginAttemptRepository::new(mysql.clone())),
                Arc::new(MySqlAccountRepository::new(mysql)),
                hasher,
                clock,
                &config,
            )
            .with_database(pool.clone());

            let result = serve(state, config).await;
            info!(pool = %pool.get_statistics(), "Closing database pool");
            pool.close().await;
            result
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(filter);
    let fmt = tracing_subscriber::fmt::layer()
        .with_file(logging.source_location)
        .with_line_number(logging.source_location);

    match logging.format {
        LogFormat::Json => registry.with(fmt.json()).init(),
        LogFormat::Pretty => registry.with(fmt.pretty()).init(),
        LogFormat::Compact => registry.with(fmt.compact()).init(),
    }
}

/// Seed the configured operator so a fresh store can be logged into
async fn seed_bootstrap_admin<U, L, A, H, C>(
    state: &AppState<U, L, A, H, C>,
    config: &AppConfig,
) -> anyhow::Result<()>
where
    U: UserRepository,
    L: LoginAttemptRepository,
    A: AccountRepository,
    H: PasswordHasher,
    C: Clock,
{
    let Some(admin) = config.auth.bootstrap_admin.clone() else {
        return Ok(());
    };

    let result = state
        .user_service
        .create(NewUser {
            name: admin.name,
            email: admin.email,
            password: admin.password.clone(),
            password_confirm: admin.password,
        })
        .await;

    match result {
        Ok(user) => {
            info!(user_id = %user.id, "Bootstrap admin created");
            Ok(())
        }
        Err(DomainError::Conflict { .. }) => {
            info!("Bootstrap admin already present");
            Ok(())
        }
        Err(error) => Err(anyhow::anyhow!(error)).context("failed to seed bootstrap admin"),
    }
}

async fn serve<U, L, A, H, C>(state: AppState<U, L, A, H, C>, config: AppConfig) -> anyhow::Result<()>
where
    U: UserRepository + 'static,
    L: LoginAttemptRepository + 'static,
    A: AccountRepository + 'static,
    H: PasswordHasher + 'static,
    C: Clock + 'static,
{
    seed_bootstrap_admin(&state, &config).await?;

    let bind_address = config.server.bind_address();
    let keep_alive = std::time::Duration::from_secs(config.server.keep_alive);
    let workers = config.server.workers;
    let app_config = config.clone();

    let mut server = HttpServer::new(move || create_app(state.clone(), &app_config))
        .keep_alive(keep_alive);
    if workers > 0 {
        server = server.workers(workers);
    }

    info!(address = %bind_address, "Listening");
    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server terminated with an error")
}
