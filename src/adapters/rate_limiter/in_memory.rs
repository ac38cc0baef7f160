//! In-memory rate limiter for single-instance deployments.
//!
//! Uses a rolling-window counter over a HashMap. The whole check-and-set
//! runs under one write lock, so two concurrent requests for the same key
//! can never both observe the same count and both proceed.
//!
//! Scaling limitation: counters live in this process only. A multi-replica
//! gateway must use [`super::RedisResetRateLimiter`] so all replicas share
//! one budget.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::RateLimitStoreError;
use crate::ports::{RateLimitDecision, ResetRateLimiter};

use super::ResetLimits;

/// Entries above this count trigger an eviction sweep of closed windows.
const SWEEP_THRESHOLD: usize = 1024;

/// Per-key rolling-window state.
#[derive(Debug, Clone)]
struct ResetRecord {
    /// Attempts in the current window.
    count: u32,
    /// Unix seconds at which the current window opened.
    window_start: u64,
    /// Unix seconds of the last successful send, for the cooldown clock.
    last_send: Option<u64>,
}

/// In-memory reset rate limiter.
#[derive(Debug)]
pub struct InMemoryResetRateLimiter {
    limits: ResetLimits,
    windows: RwLock<HashMap<String, ResetRecord>>,
    #[cfg(test)]
    clock_skew: std::sync::atomic::AtomicU64,
}

impl InMemoryResetRateLimiter {
    /// Creates a limiter with the given limits.
    pub fn new(limits: ResetLimits) -> Self {
        Self {
            limits,
            windows: RwLock::new(HashMap::new()),
            #[cfg(test)]
            clock_skew: std::sync::atomic::AtomicU64::new(0),
        }
    }

    /// Creates a limiter with the documented defaults (3 per hour, 60s cooldown).
    pub fn with_defaults() -> Self {
        Self::new(ResetLimits::default())
    }

    fn now_secs(&self) -> u64 {
        let real = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        #[cfg(test)]
        {
            return real + self.clock_skew.load(std::sync::atomic::Ordering::Relaxed);
        }
        #[cfg(not(test))]
        real
    }

    /// Advances the limiter's clock in tests without sleeping.
    #[cfg(test)]
    pub fn advance(&self, secs: u64) {
        self.clock_skew
            .fetch_add(secs, std::sync::atomic::Ordering::Relaxed);
    }

    /// Drops entries whose window and cooldown have both elapsed.
    fn sweep(windows: &mut HashMap<String, ResetRecord>, limits: ResetLimits, now: u64) {
        windows.retain(|_, record| {
            let window_live = now < record.window_start + limits.window_secs;
            let cooldown_live = record
                .last_send
                .is_some_and(|sent| now < sent + limits.cooldown_secs);
            window_live || cooldown_live
        });
    }
}

#[async_trait]
impl ResetRateLimiter for InMemoryResetRateLimiter {
    async fn check_and_increment(
        &self,
        key: &str,
    ) -> Result<RateLimitDecision, RateLimitStoreError> {
        let now = self.now_secs();
        let mut windows = self.windows.write().await;

        if windows.len() > SWEEP_THRESHOLD {
            Self::sweep(&mut windows, self.limits, now);
        }

        let record = windows.entry(key.to_string()).or_insert(ResetRecord {
            count: 0,
            window_start: now,
            last_send: None,
        });

        // A fresh attempt after the window closed starts a new window.
        if now >= record.window_start + self.limits.window_secs {
            record.count = 0;
            record.window_start = now;
        }

        if record.count >= self.limits.max_attempts {
            let retry_after_secs =
                (record.window_start + self.limits.window_secs).saturating_sub(now);
            return Ok(RateLimitDecision::Denied {
                retry_after_secs: retry_after_secs.max(1),
            });
        }

        record.count += 1;
        Ok(RateLimitDecision::Allowed)
    }

    async fn check_cooldown(&self, key: &str) -> Result<RateLimitDecision, RateLimitStoreError> {
        let now = self.now_secs();
        let windows = self.windows.read().await;

        let Some(sent) = windows.get(key).and_then(|record| record.last_send) else {
            return Ok(RateLimitDecision::Allowed);
        };

        let cooldown_end = sent + self.limits.cooldown_secs;
        if now < cooldown_end {
            return Ok(RateLimitDecision::Denied {
                retry_after_secs: (cooldown_end - now).max(1),
            });
        }
        Ok(RateLimitDecision::Allowed)
    }

    async fn record_send(&self, key: &str) -> Result<(), RateLimitStoreError> {
        let now = self.now_secs();
        let mut windows = self.windows.write().await;

        let record = windows.entry(key.to_string()).or_insert(ResetRecord {
            count: 0,
            window_start: now,
            last_send: None,
        });
        record.last_send = Some(now);
        Ok(())
    }
}
