//! Client IP extraction behind reverse proxies.

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use http::HeaderMap;

/// Extract the originating client IP.
///
/// Order of precedence:
/// 1. `X-Forwarded-For` header (first IP in the chain)
/// 2. `X-Real-IP` header
/// 3. Transport-level peer address
pub fn extract_client_ip(
    headers: &HeaderMap,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
) -> Option<String> {
    if let Some(forwarded) = headers.get("X-Forwarded-For").and_then(|h| h.to_str().ok()) {
        if let Some(first_ip) = forwarded.split(',').next() {
            let first_ip = first_ip.trim();
            if !first_ip.is_empty() {
                return Some(first_ip.to_string());
            }
        }
    }

    if let Some(real_ip) = headers.get("X-Real-IP").and_then(|h| h.to_str().ok()) {
        if !real_ip.trim().is_empty() {
            return Some(real_ip.trim().to_string());
        }
    }

    connect_info.map(|ci| ci.0.ip().to_string())
}
