//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - JWT issuance configuration
//! - `database` - Database connection, pool and storage backend selection
//! - `environment` - Environment detection and logging configuration
//! - `ledger` - Balance ledger retry bounds
//! - `server` - HTTP server configuration
//! - `throttle` - Login attempt throttling

pub mod auth;
pub mod database;
pub mod environment;
pub mod ledger;
pub mod server;
pub mod throttle;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, BootstrapAdmin};
pub use database::{DatabaseConfig, StorageBackend, StorageConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use ledger::LedgerConfig;
pub use server::ServerConfig;
pub use throttle::ThrottleConfig;

/// Prefix for environment variable overrides, e.g. `MINIBANK_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "MINIBANK";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Storage backend selection
    #[serde(default)]
    pub storage: StorageConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Login throttle configuration
    #[serde(default)]
    pub throttle: ThrottleConfig,

    /// Ledger configuration
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Baseline configuration for an environment before file and env overrides
    pub fn for_environment(environment: Environment) -> Self {
        let mut config = Self {
            environment,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            storage: StorageConfig::default(),
            auth: AuthConfig::default(),
            throttle: ThrottleConfig::default(),
            ledger: LedgerConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        };

        if environment.is_production() {
            config.database = config.database.with_max_connections(50);
        } else {
            config.storage.backend = StorageBackend::Memory;
        }

        config
    }

    /// Load configuration layering defaults, `config.<env>.toml` and
    /// `MINIBANK_*` environment variables (nested keys separated by `__`)
    pub fn load() -> Result<Self, config::ConfigError> {
        let environment = Environment::from_env();
        Self::load_for(environment)
    }

    /// Same as [`AppConfig::load`] with an explicit environment
    pub fn load_for(environment: Environment) -> Result<Self, config::ConfigError> {
        let defaults = Self::for_environment(environment);

        config::Config::builder()
            .add_source(config::Config::try_from(&defaults)?)
            .add_source(config::File::with_name(&environment.config_file()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
