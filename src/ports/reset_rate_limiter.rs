//! Rate limiting port for the password-reset flow.
//!
//! Tracks per-email attempt counts inside a rolling window plus a
//! last-successful-send timestamp for cooldown enforcement. Implementations
//! must be thread-safe; `check_and_increment` must be indivisible under
//! concurrent access for the same key.

use async_trait::async_trait;

use crate::domain::RateLimitStoreError;

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// The attempt may proceed.
    Allowed,
    /// The attempt is rejected; retry after the given number of seconds.
    Denied { retry_after_secs: u64 },
}

impl RateLimitDecision {
    /// Returns true if the attempt was allowed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed)
    }
}

/// Port over the shared attempt-counter store.
///
/// Keys are normalized email addresses. The in-memory adapter is only valid
/// for single-instance deployments; multi-replica gateways must use the
/// Redis adapter so all replicas share one budget.
#[async_trait]
pub trait ResetRateLimiter: Send + Sync {
    /// Atomically checks and consumes one attempt from the rolling window.
    ///
    /// A fresh window (first attempt, or more than the window duration since
    /// the window started) starts with count 1 and allows the attempt.
    /// Within a live window the attempt is allowed while the count is below
    /// the budget; at the budget it is denied with the seconds remaining
    /// until the window resets.
    async fn check_and_increment(
        &self,
        key: &str,
    ) -> Result<RateLimitDecision, RateLimitStoreError>;

    /// Checks the resend cooldown, independent of the hourly counter.
    ///
    /// Denies while fewer than the configured cooldown seconds have elapsed
    /// since the last *successful* send for this key. Evaluated before
    /// `check_and_increment` so a tight resend loop is rejected on cooldown
    /// grounds without consuming hourly budget.
    async fn check_cooldown(&self, key: &str) -> Result<RateLimitDecision, RateLimitStoreError>;

    /// Records a successful send, starting the cooldown clock for this key.
    async fn record_send(&self, key: &str) -> Result<(), RateLimitStoreError>;
}
