//! Redis configuration for the shared rate-limit store.

use serde::Deserialize;

use super::error::ValidationError;

/// Connection settings for the shared rate-limit store.
///
/// This section is optional: without it the gateway falls back to the
/// in-process limiter, which only bounds attempts per instance.
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    /// Redis connection URL, e.g. `redis://localhost:6379`.
    pub url: String,
}

impl RedisConfig {
    /// Validate Redis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.url.starts_with("redis://") && !self.url.starts_with("rediss://") {
            return Err(ValidationError::InvalidRedisUrl);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_redis_schemes() {
        assert!(RedisConfig { url: "redis://localhost:6379".into() }.validate().is_ok());
        assert!(RedisConfig { url: "rediss://cache:6380".into() }.validate().is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(RedisConfig { url: "http://localhost".into() }.validate().is_err());
    }
}
