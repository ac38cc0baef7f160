//! Catch-all proxy handler.
//!
//! Resolves the target backend from the path prefix, transforms the request
//! with identity and correlation headers, and dispatches it asynchronously.
//! Backend HTTP error responses pass through verbatim; only transport-level
//! failures become gateway routing errors.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    response::{IntoResponse, Response},
};
use http::header::{CONNECTION, TRANSFER_ENCODING};

use crate::domain::{correlation, BackendService, CorrelationId, GatewayError, RouteTable, RoutingError, UserContext};
use crate::ports::{BackendClient, DispatchError, ProxyRequest};

use super::transform::transform_headers;

/// Forwarded bodies are buffered; cap them so one request cannot pin
/// unbounded memory.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Shared state for the proxy handler.
///
/// The route table is read-only after startup; concurrent dispatches share
/// nothing mutable beyond the client's connection pool.
#[derive(Clone)]
pub struct ProxyState {
    pub table: Arc<RouteTable>,
    pub client: Arc<dyn BackendClient>,
}

/// Handles every request not claimed by a gateway-owned route.
pub async fn proxy_request(State(state): State<ProxyState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let path = parts.uri.path().to_string();

    let service = match state.table.resolve(&path) {
        Ok(service) => service,
        Err(error) => {
            tracing::warn!(path = %path, %error, "no route for request");
            return GatewayError::from(error).into_response();
        }
    };

    let base_url = match state.table.base_url(service) {
        Ok(url) => url.to_string(),
        Err(error) => return GatewayError::from(error).into_response(),
    };

    let body = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes.to_vec(),
        Err(error) => {
            return GatewayError::from(RoutingError::BackendUnreachable {
                service,
                reason: format!("failed to buffer request body: {error}"),
            })
            .into_response();
        }
    };

    let user = parts.extensions.get::<UserContext>().cloned();
    let correlation_id = correlation::current()
        .or_else(|| parts.extensions.get::<CorrelationId>().cloned())
        .unwrap_or_else(CorrelationId::generate);

    let headers = transform_headers(&parts.headers, user.as_ref(), &correlation_id);

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or(path.as_str());
    let url = format!("{base_url}{path_and_query}");

    tracing::info!(
        method = %parts.method,
        service = %service,
        path = %path,
        "routing request to backend"
    );

    let outbound = ProxyRequest {
        method: parts.method.clone(),
        url,
        headers,
        body,
    };

    match state.client.send(outbound).await {
        Ok(backend_response) => {
            tracing::debug!(
                service = %service,
                status = %backend_response.status,
                "received backend response"
            );

            let mut response = Response::builder().status(backend_response.status);
            if let Some(headers) = response.headers_mut() {
                for (name, value) in &backend_response.headers {
                    // Hop-by-hop headers do not survive re-framing.
                    if name == CONNECTION || name == TRANSFER_ENCODING {
                        continue;
                    }
                    headers.append(name.clone(), value.clone());
                }
            }
            response
                .body(Body::from(backend_response.body))
                .unwrap_or_else(|_| {
                    GatewayError::from(RoutingError::BackendUnreachable {
                        service,
                        reason: "invalid backend response".to_string(),
                    })
                    .into_response()
                })
        }
        Err(error) => {
            tracing::error!(service = %service, %error, "backend dispatch failed");
            GatewayError::from(routing_error(service, error)).into_response()
        }
    }
}

fn routing_error(service: BackendService, error: DispatchError) -> RoutingError {
    match error {
        DispatchError::Timeout => RoutingError::BackendTimeout { service },
        DispatchError::Connect(reason) | DispatchError::Other(reason) => {
            RoutingError::BackendUnreachable { service, reason }
        }
    }
}
