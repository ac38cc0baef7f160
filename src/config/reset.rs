//! Password-reset flow configuration (rate limits, cooldown, frontend link).

use serde::Deserialize;

use super::error::ValidationError;

/// Limits and link settings for the forgot-password flow.
///
/// The documented behavior is 3 requests per rolling hour per email, with a
/// 60 second resend cooldown after each successful send.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetConfig {
    /// Attempts allowed per rolling window per email.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Rolling window length in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Seconds a key must wait after a successful send before resending.
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,

    /// Frontend base URL the reset link points back into.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
}

impl ResetConfig {
    /// Validate reset configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_attempts == 0 {
            return Err(ValidationError::InvalidResetBudget);
        }
        if self.window_secs <= self.cooldown_secs {
            return Err(ValidationError::WindowShorterThanCooldown);
        }
        if url::Url::parse(&self.frontend_url).is_err() {
            return Err(ValidationError::InvalidFrontendUrl);
        }
        Ok(())
    }
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            window_secs: default_window_secs(),
            cooldown_secs: default_cooldown_secs(),
            frontend_url: default_frontend_url(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_window_secs() -> u64 {
    3600
}

fn default_cooldown_secs() -> u64 {
    60
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_budget() {
        let config = ResetConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.window_secs, 3600);
        assert_eq!(config.cooldown_secs, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn window_must_exceed_cooldown() {
        let config = ResetConfig {
            window_secs: 30,
            cooldown_secs: 60,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_budget_is_rejected() {
        let config = ResetConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
