//! Transport port for forwarding requests to backend services.

use async_trait::async_trait;

use http::{HeaderMap, Method, StatusCode};
use thiserror::Error;

/// A fully prepared outbound request: transformed headers, absolute URL,
/// original method and body.
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// The backend's response, passed through verbatim.
///
/// 4xx/5xx statuses are ordinary responses at this layer, not errors;
/// failure attribution stays unambiguous.
#[derive(Debug, Clone)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Transport-level dispatch failures.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Other(String),
}

/// Port over the HTTP client used for backend dispatch.
///
/// No retries at this layer; retry policy, if any, belongs to the transport
/// configuration behind the implementation.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Sends the request and returns the backend's response.
    async fn send(&self, request: ProxyRequest) -> Result<ProxyResponse, DispatchError>;
}
