//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid backend service URL for {0}")]
    InvalidServiceUrl(&'static str),

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Identity provider client id must not be empty")]
    MissingIdentityClientId,

    #[error("Identity provider region must not be empty")]
    MissingIdentityRegion,

    #[error("Invalid frontend URL format")]
    InvalidFrontendUrl,

    #[error("Reset attempt budget must be at least 1")]
    InvalidResetBudget,

    #[error("Reset window must be longer than the resend cooldown")]
    WindowShorterThanCooldown,
}
