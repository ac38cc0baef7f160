//! AWS Cognito adapter for the identity provider port.
//!
//! Calls the `ForgotPassword` client API, which is unauthenticated and needs
//! only the user pool client id, as an `x-amz-json-1.1` POST. Cognito sends
//! the verification code email itself using the template selected via the
//! client metadata.
//!
//! # Enumeration safety
//!
//! `UserNotFoundException` (and related user-state errors) map to `Ok(())`:
//! an unknown recipient must be indistinguishable from a known one. Only
//! transport failures and provider-internal errors surface, and those carry
//! no account information.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::IdentityConfig;
use crate::domain::{Language, ProviderError};
use crate::ports::{IdentityProvider, PasswordResetDispatch};

const AMZ_JSON: &str = "application/x-amz-json-1.1";
const FORGOT_PASSWORD_TARGET: &str = "AWSCognitoIdentityProviderService.ForgotPassword";

/// Cognito-backed identity provider.
pub struct CognitoIdentityProvider {
    client: reqwest::Client,
    config: IdentityConfig,
}

/// Cognito error payload shape.
#[derive(Debug, Deserialize)]
struct CognitoErrorBody {
    #[serde(rename = "__type", default)]
    error_type: String,
    #[serde(default)]
    message: String,
}

impl CognitoIdentityProvider {
    /// Creates a provider from the identity configuration.
    pub fn new(config: IdentityConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| ProviderError::Internal(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Creates a provider with a caller-supplied client, for custom transport
    /// settings.
    pub fn with_client(client: reqwest::Client, config: IdentityConfig) -> Self {
        Self { client, config }
    }

    fn template_for(&self, language: Language) -> &str {
        match language {
            Language::De => &self.config.reset_template_de,
            Language::En => &self.config.reset_template_en,
        }
    }

    /// User-state errors that must not be distinguishable from success.
    fn is_enumeration_sensitive(error_type: &str) -> bool {
        let short = error_type.rsplit('#').next().unwrap_or(error_type);
        matches!(
            short,
            "UserNotFoundException" | "InvalidParameterException" | "NotAuthorizedException"
        )
    }
}

#[async_trait]
impl IdentityProvider for CognitoIdentityProvider {
    async fn initiate_password_reset(
        &self,
        dispatch: &PasswordResetDispatch,
    ) -> Result<(), ProviderError> {
        let body = json!({
            "ClientId": self.config.client_id,
            "Username": dispatch.email.as_str(),
            "ClientMetadata": {
                "template": self.template_for(dispatch.language),
                "language": dispatch.language.code(),
                "resetLink": dispatch.reset_link,
            },
        });

        let response = self
            .client
            .post(self.config.endpoint_url())
            .header("Content-Type", AMZ_JSON)
            .header("X-Amz-Target", FORGOT_PASSWORD_TARGET)
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    ProviderError::Unreachable(e.to_string())
                } else {
                    ProviderError::Internal(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(email = %dispatch.email.masked(), "provider reset flow initiated");
            return Ok(());
        }

        let error: CognitoErrorBody = response.json().await.unwrap_or(CognitoErrorBody {
            error_type: String::new(),
            message: String::new(),
        });

        if Self::is_enumeration_sensitive(&error.error_type) {
            // The caller sees success either way; only the audit log differs.
            tracing::info!(
                email = %dispatch.email.masked(),
                error_type = %error.error_type,
                "provider rejected reset for a non-resettable account, reporting success"
            );
            return Ok(());
        }

        Err(ProviderError::Internal(format!(
            "{} ({}): {}",
            status.as_u16(),
            error.error_type,
            error.message
        )))
    }
}
