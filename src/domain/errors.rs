//! Gateway error taxonomy.
//!
//! Rate-limit and validation conditions are recovered locally into
//! structured, user-safe responses; routing and provider failures are logged
//! with full context and surfaced as generic failures without internals.
//! Nothing in this taxonomy may reveal whether an email account exists.

use thiserror::Error;

use super::routing::BackendService;

/// Malformed caller input. Reported immediately, never rate-limited,
/// never forwarded to the identity provider.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Email address cannot be empty")]
    EmptyEmail,

    #[error("Invalid email address: {reason}")]
    InvalidEmail { reason: String },
}

/// Routing failures: the gateway could not hand the request to a backend.
///
/// Backend-produced HTTP error responses are *not* routing errors; they pass
/// through verbatim.
#[derive(Debug, Clone, Error)]
pub enum RoutingError {
    #[error("No route found for path: {path}")]
    UnknownRoute { path: String },

    #[error("No base URL configured for {service}")]
    UnconfiguredService { service: BackendService },

    #[error("Backend {service} is unreachable: {reason}")]
    BackendUnreachable {
        service: BackendService,
        reason: String,
    },

    #[error("Backend {service} timed out")]
    BackendTimeout { service: BackendService },
}

/// Identity-provider transport or internal failure.
///
/// Surfaced as a generic service failure; the variants carry detail for the
/// logs only, never for the caller.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("Identity provider unreachable: {0}")]
    Unreachable(String),

    #[error("Identity provider error: {0}")]
    Internal(String),
}

/// The rate-limit counter store failed.
///
/// The orchestrator fails closed on this: a broken limiter must not unbound
/// the reset budget.
#[derive(Debug, Clone, Error)]
pub enum RateLimitStoreError {
    #[error("Rate limit store unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error returned by gateway orchestration calls.
///
/// Explicit variants instead of exception-style control flow; the HTTP layer
/// translates each variant to its external response shape.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Attempt budget or cooldown violated. The only expected, routine
    /// failure mode of the password-reset flow.
    #[error("{message}")]
    RateLimitExceeded {
        message: String,
        retry_after_secs: u64,
    },

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Store(#[from] RateLimitStoreError),
}

impl GatewayError {
    /// Machine-readable error code for the response envelope.
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::Validation(_) => "VALIDATION_FAILED",
            GatewayError::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            GatewayError::Routing(RoutingError::UnknownRoute { .. }) => "UNKNOWN_ROUTE",
            GatewayError::Routing(RoutingError::BackendTimeout { .. }) => "BACKEND_TIMEOUT",
            GatewayError::Routing(_) => "BACKEND_UNREACHABLE",
            GatewayError::Provider(_) | GatewayError::Store(_) => "SERVICE_UNAVAILABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_message_is_user_facing() {
        let err = GatewayError::RateLimitExceeded {
            message: "Too many requests. Retry after 120 seconds.".to_string(),
            retry_after_secs: 120,
        };
        assert_eq!(err.to_string(), "Too many requests. Retry after 120 seconds.");
        assert_eq!(err.code(), "RATE_LIMIT_EXCEEDED");
    }

    #[test]
    fn provider_and_store_failures_share_a_generic_code() {
        let provider = GatewayError::from(ProviderError::Unreachable("dns".to_string()));
        let store = GatewayError::from(RateLimitStoreError::Unavailable("redis".to_string()));
        assert_eq!(provider.code(), "SERVICE_UNAVAILABLE");
        assert_eq!(store.code(), "SERVICE_UNAVAILABLE");
    }

    #[test]
    fn routing_variants_map_to_distinct_codes() {
        let unknown = GatewayError::from(RoutingError::UnknownRoute {
            path: "/api/v1/nope".to_string(),
        });
        let timeout = GatewayError::from(RoutingError::BackendTimeout {
            service: BackendService::EventManagement,
        });
        assert_eq!(unknown.code(), "UNKNOWN_ROUTE");
        assert_eq!(timeout.code(), "BACKEND_TIMEOUT");
    }
}
