//! Identity provider (Cognito) configuration.

use serde::Deserialize;

use super::error::ValidationError;

/// Cognito identity provider settings for the password-reset flow.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// AWS region the user pool lives in.
    #[serde(default = "default_region")]
    pub region: String,

    /// User pool app client id. The forgot-password call is an
    /// unauthenticated client API; no secret is involved.
    #[serde(default)]
    pub client_id: String,

    /// Overrides the provider endpoint. Used in tests and local stacks;
    /// when unset the standard regional endpoint is derived from `region`.
    pub endpoint: Option<String>,

    /// Reset email template name, German variant.
    #[serde(default = "default_template_de")]
    pub reset_template_de: String,

    /// Reset email template name, English variant.
    #[serde(default = "default_template_en")]
    pub reset_template_en: String,
}

impl IdentityConfig {
    /// The provider endpoint the adapter talks to.
    pub fn endpoint_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://cognito-idp.{}.amazonaws.com", self.region),
        }
    }

    /// Validate identity configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.client_id.trim().is_empty() {
            return Err(ValidationError::MissingIdentityClientId);
        }
        if self.region.trim().is_empty() {
            return Err(ValidationError::MissingIdentityRegion);
        }
        Ok(())
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            client_id: String::new(),
            endpoint: None,
            reset_template_de: default_template_de(),
            reset_template_en: default_template_en(),
        }
    }
}

fn default_region() -> String {
    "eu-central-1".to_string()
}

fn default_template_de() -> String {
    "PasswordReset-DE".to_string()
}

fn default_template_en() -> String {
    "PasswordReset-EN".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_derived_from_region_by_default() {
        let config = IdentityConfig::default();
        assert_eq!(
            config.endpoint_url(),
            "https://cognito-idp.eu-central-1.amazonaws.com"
        );
    }

    #[test]
    fn explicit_endpoint_wins_and_loses_trailing_slash() {
        let config = IdentityConfig {
            endpoint: Some("http://localhost:9229/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.endpoint_url(), "http://localhost:9229");
    }

    #[test]
    fn empty_client_id_fails_validation() {
        assert!(IdentityConfig::default().validate().is_err());
    }
}
