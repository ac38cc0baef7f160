//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `GATEWAY` prefix
//! and `__` as the nesting separator.
//!
//! # Example
//!
//! ```no_run
//! use conference_gateway::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod identity;
mod redis;
mod reset;
mod server;
mod services;

pub use error::{ConfigError, ValidationError};
pub use identity::IdentityConfig;
pub use redis::RedisConfig;
pub use reset::ResetConfig;
pub use server::{Environment, ServerConfig};
pub use services::ServicesConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Backend service base URLs
    #[serde(default)]
    pub services: ServicesConfig,

    /// Identity provider (Cognito) settings
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Password-reset limits and frontend link
    #[serde(default)]
    pub reset: ResetConfig,

    /// Shared rate-limit store; optional for single-instance deployments
    #[serde(default)]
    pub redis: Option<RedisConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads `GATEWAY__`-prefixed
    /// environment variables, e.g.:
    ///
    /// - `GATEWAY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `GATEWAY__SERVICES__EVENT_MANAGEMENT_URL=...`
    /// - `GATEWAY__REDIS__URL=redis://cache:6379`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GATEWAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration sections
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.services.validate()?;
        self.identity.validate()?;
        self.reset.validate()?;
        if let Some(redis) = &self.redis {
            redis.validate()?;
        }
        Ok(())
    }
}
