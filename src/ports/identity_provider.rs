//! Identity provider port for the password-reset flow.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Language, ProviderError};

/// Everything the provider needs to render and send one reset email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetDispatch {
    /// Recipient, already validated and normalized.
    pub email: EmailAddress,
    /// Negotiated template language.
    pub language: Language,
    /// Link back into the frontend reset page, embedded in the email.
    pub reset_link: String,
}

/// Port over the black-box identity provider's "send password reset" operation.
///
/// Invoked exactly once per allowed initiate/resend call. Implementations
/// must tolerate "email not found" without signaling that fact back: an
/// unknown recipient is a success from the gateway's point of view, because
/// anything else would let a caller enumerate registered addresses. Only
/// transport and provider-internal failures surface as errors.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Initiates the provider's password-reset flow for the given address.
    async fn initiate_password_reset(
        &self,
        dispatch: &PasswordResetDispatch,
    ) -> Result<(), ProviderError>;
}
