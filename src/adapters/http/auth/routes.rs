//! HTTP routes for the password-reset endpoints.

use axum::{routing::post, Router};

use super::handlers::{forgot_password, resend_reset_link, AuthState};

/// Creates the auth router. Nested under `/api/v1/auth` by the caller.
pub fn auth_routes(state: AuthState) -> Router {
    Router::new()
        .route("/forgot-password", post(forgot_password))
        .route("/resend-reset-link", post(resend_reset_link))
        .with_state(state)
}
