//! Correlation identity for cross-service tracing.
//!
//! A correlation id identifies one logical end-user operation across every
//! service it touches. The stamping middleware binds the id to the request's
//! task before any downstream work runs; `current()` makes it readable from
//! anywhere inside that task without threading it through call signatures.

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque correlation token, unique per logical operation.
///
/// Reused verbatim from the inbound `X-Correlation-ID` header when present,
/// otherwise freshly generated. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Generates a new unique correlation id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Builds a correlation id from an inbound header value.
    ///
    /// Returns `None` for missing or blank values so the caller falls back
    /// to `generate()`.
    pub fn from_header(value: Option<&str>) -> Option<Self> {
        let trimmed = value?.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

tokio::task_local! {
    static CURRENT_CORRELATION: CorrelationId;
}

/// Runs a future with the given correlation id bound to the current task.
///
/// The binding is released when the future completes, on every exit path
/// including panics and cancellation.
pub async fn scope<F: Future>(id: CorrelationId, f: F) -> F::Output {
    CURRENT_CORRELATION.scope(id, f).await
}

/// Returns the correlation id bound to the current task, if any.
pub fn current() -> Option<CorrelationId> {
    CURRENT_CORRELATION.try_with(|id| id.clone()).ok()
}
