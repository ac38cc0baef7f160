//! HTTP handlers for the password-reset endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, State},
    Json,
};
use http::HeaderMap;

use crate::adapters::http::client_ip::extract_client_ip;
use crate::application::{PasswordResetService, ResetKind};
use crate::domain::{GatewayError, Language};

use super::dto::{ForgotPasswordRequest, ResetLinkResponse};

/// Shared state for the auth routes.
#[derive(Clone)]
pub struct AuthState {
    pub reset: Arc<PasswordResetService>,
}

/// POST /forgot-password - Start the password-reset flow
pub async fn forgot_password(
    State(state): State<AuthState>,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<ResetLinkResponse>, GatewayError> {
    handle_reset(state, headers, connect_info, req, ResetKind::Initiate).await
}

/// POST /resend-reset-link - Resend the reset email
pub async fn resend_reset_link(
    State(state): State<AuthState>,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<ResetLinkResponse>, GatewayError> {
    handle_reset(state, headers, connect_info, req, ResetKind::Resend).await
}

async fn handle_reset(
    state: AuthState,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    req: ForgotPasswordRequest,
    kind: ResetKind,
) -> Result<Json<ResetLinkResponse>, GatewayError> {
    let language = Language::negotiate(
        headers
            .get(http::header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok()),
    );
    let client_ip = extract_client_ip(&headers, connect_info.as_ref());

    let message = state
        .reset
        .request_reset(&req.email, kind, language, client_ip.as_deref())
        .await?;

    Ok(Json(ResetLinkResponse::ok(message)))
}
