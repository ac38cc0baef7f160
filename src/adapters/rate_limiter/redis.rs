//! Redis-backed rate limiter for multi-replica deployments.
//!
//! The attempt counter uses INCR + EXPIRE-on-first: INCR is atomic on the
//! server, so concurrent replicas can never double-spend an attempt. The
//! cooldown is a separate expiring key written on each successful send;
//! its remaining TTL is the retry hint.
//!
//! The counter may climb past the budget on denied attempts; that is
//! harmless, the window expiry resets it and the deny threshold only
//! compares against the configured maximum.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::RateLimitStoreError;
use crate::ports::{RateLimitDecision, ResetRateLimiter};

use super::ResetLimits;

/// Redis-backed reset rate limiter.
#[derive(Clone)]
pub struct RedisResetRateLimiter {
    conn: MultiplexedConnection,
    limits: ResetLimits,
}

impl RedisResetRateLimiter {
    /// Creates a limiter over an established Redis connection.
    pub fn new(conn: MultiplexedConnection, limits: ResetLimits) -> Self {
        Self { conn, limits }
    }

    fn attempts_key(key: &str) -> String {
        format!("pwreset:attempts:{key}")
    }

    fn cooldown_key(key: &str) -> String {
        format!("pwreset:cooldown:{key}")
    }
}

#[async_trait]
impl ResetRateLimiter for RedisResetRateLimiter {
    async fn check_and_increment(
        &self,
        key: &str,
    ) -> Result<RateLimitDecision, RateLimitStoreError> {
        let attempts_key = Self::attempts_key(key);
        let mut conn = self.conn.clone();

        let count: i64 = conn
            .incr(&attempts_key, 1_i64)
            .await
            .map_err(|e: redis::RedisError| RateLimitStoreError::Unavailable(e.to_string()))?;

        // First attempt in the window opens it.
        if count == 1 {
            conn.expire::<_, ()>(&attempts_key, self.limits.window_secs as i64)
                .await
                .map_err(|e: redis::RedisError| RateLimitStoreError::Unavailable(e.to_string()))?;
        }

        if count > self.limits.max_attempts as i64 {
            let ttl: i64 = conn
                .ttl(&attempts_key)
                .await
                .map_err(|e: redis::RedisError| RateLimitStoreError::Unavailable(e.to_string()))?;
            let retry_after_secs = if ttl > 0 {
                ttl as u64
            } else {
                self.limits.window_secs
            };
            return Ok(RateLimitDecision::Denied {
                retry_after_secs: retry_after_secs.max(1),
            });
        }

        Ok(RateLimitDecision::Allowed)
    }

    async fn check_cooldown(&self, key: &str) -> Result<RateLimitDecision, RateLimitStoreError> {
        let cooldown_key = Self::cooldown_key(key);
        let mut conn = self.conn.clone();

        let ttl: i64 = conn
            .ttl(&cooldown_key)
            .await
            .map_err(|e: redis::RedisError| RateLimitStoreError::Unavailable(e.to_string()))?;

        // TTL of -2 means no key, -1 means no expiry set; both allow.
        if ttl > 0 {
            return Ok(RateLimitDecision::Denied {
                retry_after_secs: ttl as u64,
            });
        }
        Ok(RateLimitDecision::Allowed)
    }

    async fn record_send(&self, key: &str) -> Result<(), RateLimitStoreError> {
        let cooldown_key = Self::cooldown_key(key);
        let mut conn = self.conn.clone();

        // Each successful send restarts the cooldown clock.
        conn.set::<_, _, ()>(&cooldown_key, 1_u8)
            .await
            .map_err(|e: redis::RedisError| RateLimitStoreError::Unavailable(e.to_string()))?;
        conn.expire::<_, ()>(&cooldown_key, self.limits.cooldown_secs as i64)
            .await
            .map_err(|e: redis::RedisError| RateLimitStoreError::Unavailable(e.to_string()))?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisResetRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisResetRateLimiter")
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}
