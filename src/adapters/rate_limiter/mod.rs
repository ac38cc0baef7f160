//! Rate limiter adapters.
//!
//! - `in_memory` - process-local store for single-instance deployments
//! - `redis` - shared store for multi-replica deployments

mod in_memory;
mod redis;

pub use in_memory::InMemoryResetRateLimiter;
pub use redis::RedisResetRateLimiter;

/// Effective limits for the reset flow, shared by both adapters.
#[derive(Debug, Clone, Copy)]
pub struct ResetLimits {
    /// Attempts allowed per rolling window per key.
    pub max_attempts: u32,
    /// Rolling window length in seconds.
    pub window_secs: u64,
    /// Seconds between successful sends for one key.
    pub cooldown_secs: u64,
}

impl From<&crate::config::ResetConfig> for ResetLimits {
    fn from(config: &crate::config::ResetConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            window_secs: config.window_secs,
            cooldown_secs: config.cooldown_secs,
        }
    }
}

impl Default for ResetLimits {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            window_secs: 3600,
            cooldown_secs: 60,
        }
    }
}
