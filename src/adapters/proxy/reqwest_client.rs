//! reqwest implementation of the `BackendClient` port.
//!
//! reqwest and axum sit on different `http` major versions, so header and
//! method values cross the boundary as bytes rather than shared types.

use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

use crate::ports::{BackendClient, DispatchError, ProxyRequest, ProxyResponse};

/// Backend HTTP client with a per-request timeout and no retries.
///
/// A dispatch either reaches the backend once or fails with an attributable
/// transport error.
#[derive(Debug, Clone)]
pub struct ReqwestBackendClient {
    client: reqwest::Client,
}

impl ReqwestBackendClient {
    /// Creates a client with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DispatchError::Other(e.to_string()))?;
        Ok(Self { client })
    }
}

fn classify(error: reqwest::Error) -> DispatchError {
    if error.is_timeout() {
        DispatchError::Timeout
    } else if error.is_connect() {
        DispatchError::Connect(error.to_string())
    } else {
        DispatchError::Other(error.to_string())
    }
}

#[async_trait]
impl BackendClient for ReqwestBackendClient {
    async fn send(&self, request: ProxyRequest) -> Result<ProxyResponse, DispatchError> {
        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|e| DispatchError::Other(e.to_string()))?;

        let mut headers = reqwest::header::HeaderMap::with_capacity(request.headers.len());
        for (name, value) in &request.headers {
            let name = reqwest::header::HeaderName::from_bytes(name.as_str().as_bytes());
            let value = reqwest::header::HeaderValue::from_bytes(value.as_bytes());
            if let (Ok(name), Ok(value)) = (name, value) {
                headers.append(name, value);
            }
        }

        let response = self
            .client
            .request(method, &request.url)
            .headers(headers)
            .body(request.body)
            .send()
            .await
            .map_err(classify)?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .map_err(|e| DispatchError::Other(e.to_string()))?;

        let mut out_headers = HeaderMap::with_capacity(response.headers().len());
        for (name, value) in response.headers() {
            let name = HeaderName::from_bytes(name.as_str().as_bytes());
            let value = HeaderValue::from_bytes(value.as_bytes());
            if let (Ok(name), Ok(value)) = (name, value) {
                out_headers.append(name, value);
            }
        }

        let body = response.bytes().await.map_err(classify)?.to_vec();

        Ok(ProxyResponse {
            status,
            headers: out_headers,
            body,
        })
    }
}
