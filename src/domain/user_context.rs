//! Authenticated user context carried through the gateway.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity context derived from a validated token by the upstream
/// authentication step.
///
/// The gateway treats this as read-only: it is created once per request,
/// attached to the request's extensions, and discarded at request end.
/// The router and transformer only ever read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    /// Stable user identifier (token subject).
    pub user_id: String,
    /// The user's email address.
    pub email: String,
    /// Whether the identity provider has verified the email.
    pub email_verified: bool,
    /// Primary role, e.g. `"organizer"` or `"speaker"`.
    pub role: String,
    /// Company the user belongs to, when applicable.
    pub company_id: Option<String>,
    /// Roles beyond the primary one.
    pub additional_roles: Vec<String>,
    /// Session identifier from the token.
    pub session_id: String,
    /// When the token was issued.
    pub issued_at: Option<DateTime<Utc>>,
    /// When the token expires.
    pub expires_at: Option<DateTime<Utc>>,
    /// Arbitrary custom claims forwarded as-is.
    pub custom_claims: HashMap<String, String>,
}

impl UserContext {
    /// Creates a context with the required identity fields.
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            email_verified: false,
            role: role.into(),
            company_id: None,
            additional_roles: Vec::new(),
            session_id: session_id.into(),
            issued_at: None,
            expires_at: None,
            custom_claims: HashMap::new(),
        }
    }

    /// Sets the company identifier.
    pub fn with_company(mut self, company_id: impl Into<String>) -> Self {
        self.company_id = Some(company_id.into());
        self
    }

    /// Marks the email as verified.
    pub fn with_verified_email(mut self) -> Self {
        self.email_verified = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_required_fields() {
        let ctx = UserContext::new("user-1", "a@x.com", "organizer", "sess-1");
        assert_eq!(ctx.user_id, "user-1");
        assert_eq!(ctx.role, "organizer");
        assert!(!ctx.email_verified);
        assert!(ctx.company_id.is_none());
    }

    #[test]
    fn with_company_attaches_the_company_id() {
        let ctx = UserContext::new("user-1", "a@x.com", "organizer", "sess-1")
            .with_company("company-9");
        assert_eq!(ctx.company_id.as_deref(), Some("company-9"));
    }
}
