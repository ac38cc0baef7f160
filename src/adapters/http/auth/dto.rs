//! Request/response DTOs for the password-reset endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /forgot-password` and `POST /resend-reset-link`.
#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Success envelope, identical for known and unknown addresses.
#[derive(Debug, Clone, Serialize)]
pub struct ResetLinkResponse {
    pub success: bool,
    pub message: String,
}

impl ResetLinkResponse {
    pub fn ok(message: String) -> Self {
        Self {
            success: true,
            message,
        }
    }
}
