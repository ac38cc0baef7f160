//! Top-level router assembly.

use axum::{
    middleware::from_fn,
    routing::{any, get},
    Json, Router,
};
use serde_json::{json, Value};

use crate::adapters::proxy::{proxy_request, ProxyState};

use super::auth::{auth_routes, AuthState};
use super::middleware::{correlation_middleware, version_middleware};

/// Assembles the gateway router.
///
/// The auth endpoints are served locally under `/api/v1/auth`; every other
/// path falls through to the reverse proxy. Correlation runs outermost so
/// that version tagging, the proxy, and all error responses observe the
/// bound correlation id.
pub fn build_router(auth: AuthState, proxy: ProxyState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1/auth", auth_routes(auth))
        .fallback_service(any(proxy_request).with_state(proxy))
        .layer(from_fn(version_middleware))
        .layer(from_fn(correlation_middleware))
}

/// GET /health - liveness probe
async fn health() -> Json<Value> {
    Json(json!({
        "status": "UP",
        "service": "conference-gateway",
    }))
}
