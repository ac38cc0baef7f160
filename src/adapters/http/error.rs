//! Translation of gateway error variants to HTTP responses.
//!
//! The single place that decides what a caller sees for each failure class.
//! Validation and rate-limit conditions carry their own messages; routing,
//! provider, and store failures are flattened to generic text so internals
//! (and account existence) never leak.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::{HeaderValue, StatusCode};
use serde::Serialize;

use crate::domain::{GatewayError, RoutingError};

/// Structured error envelope returned for every non-success outcome.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, error, message, retry_after) = match &self {
            GatewayError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                "Validation failed",
                err.to_string(),
                None,
            ),
            GatewayError::RateLimitExceeded {
                message,
                retry_after_secs,
            } => (
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit exceeded",
                message.clone(),
                Some(*retry_after_secs),
            ),
            GatewayError::Routing(RoutingError::UnknownRoute { path }) => (
                StatusCode::BAD_GATEWAY,
                "Routing failed",
                format!("No route found for path: {path}"),
                None,
            ),
            GatewayError::Routing(RoutingError::BackendTimeout { service }) => (
                StatusCode::GATEWAY_TIMEOUT,
                "Routing failed",
                format!("The {service} backend did not respond in time"),
                None,
            ),
            GatewayError::Routing(
                RoutingError::BackendUnreachable { service, .. }
                | RoutingError::UnconfiguredService { service },
            ) => (
                StatusCode::BAD_GATEWAY,
                "Routing failed",
                format!("The {service} backend is currently unavailable"),
                None,
            ),
            GatewayError::Provider(_) | GatewayError::Store(_) => (
                StatusCode::BAD_GATEWAY,
                "Service unavailable",
                "The service is temporarily unavailable. Please try again later.".to_string(),
                None,
            ),
        };

        let mut response = (
            status,
            Json(ErrorBody {
                error,
                code,
                message,
                retry_after_secs: retry_after,
            }),
        )
            .into_response();

        if let Some(secs) = retry_after {
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert("Retry-After", value);
            }
        }

        response
    }
}
