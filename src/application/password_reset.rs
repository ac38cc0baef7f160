//! Password-reset orchestration.
//!
//! Coordinates validation, rate limiting, and the identity-provider dispatch
//! for the forgot-password and resend-reset-link endpoints. The response
//! envelope is deliberately identical for registered and unregistered
//! addresses so the endpoint cannot be used to enumerate accounts; only a
//! rate-limit rejection or an infrastructure failure is visible to callers.

use std::sync::Arc;

use tracing::{info, warn};
use url::form_urlencoded;

use crate::domain::{EmailAddress, GatewayError, Language};
use crate::ports::{IdentityProvider, PasswordResetDispatch, RateLimitDecision, ResetRateLimiter};

/// Which reset endpoint was called. Only changes the confirmation wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetKind {
    Initiate,
    Resend,
}

/// Orchestrates the password-reset flow over the limiter and provider ports.
pub struct PasswordResetService {
    limiter: Arc<dyn ResetRateLimiter>,
    provider: Arc<dyn IdentityProvider>,
    frontend_url: String,
}

impl PasswordResetService {
    pub fn new(
        limiter: Arc<dyn ResetRateLimiter>,
        provider: Arc<dyn IdentityProvider>,
        frontend_url: impl Into<String>,
    ) -> Self {
        let frontend_url = frontend_url.into();
        Self {
            limiter,
            provider,
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
        }
    }

    /// Runs the reset flow for one request.
    ///
    /// On success returns the localized confirmation message. The message is
    /// the same whether or not an account exists for the address.
    pub async fn request_reset(
        &self,
        raw_email: &str,
        kind: ResetKind,
        language: Language,
        client_ip: Option<&str>,
    ) -> Result<String, GatewayError> {
        let email = EmailAddress::parse(raw_email)?;
        let key = email.as_str();
        let ip = client_ip.unwrap_or("unknown");

        // Cooldown first: a rapid resend is rejected without consuming
        // any of the hourly budget.
        if let RateLimitDecision::Denied { retry_after_secs } =
            self.limiter.check_cooldown(key).await?
        {
            warn!(
                email = %email.masked(),
                client_ip = ip,
                retry_after_secs,
                outcome = "RATE_LIMIT_EXCEEDED",
                "password reset rejected by resend cooldown"
            );
            return Err(GatewayError::RateLimitExceeded {
                message: cooldown_message(language, retry_after_secs),
                retry_after_secs,
            });
        }

        if let RateLimitDecision::Denied { retry_after_secs } =
            self.limiter.check_and_increment(key).await?
        {
            warn!(
                email = %email.masked(),
                client_ip = ip,
                retry_after_secs,
                outcome = "RATE_LIMIT_EXCEEDED",
                "password reset rejected by hourly budget"
            );
            return Err(GatewayError::RateLimitExceeded {
                message: budget_message(language, retry_after_secs),
                retry_after_secs,
            });
        }

        let dispatch = PasswordResetDispatch {
            reset_link: self.reset_link(&email, language),
            email: email.clone(),
            language,
        };

        // On provider failure the attempt stays counted; retried failures
        // still burn budget so a broken provider cannot be hammered.
        if let Err(err) = self.provider.initiate_password_reset(&dispatch).await {
            warn!(
                email = %email.masked(),
                client_ip = ip,
                error = %err,
                outcome = "FAILURE",
                "password reset dispatch failed"
            );
            return Err(GatewayError::Provider(err));
        }

        // The email is already on its way; a failed cooldown write must not
        // turn this into a caller-visible error.
        if let Err(err) = self.limiter.record_send(key).await {
            warn!(
                email = %email.masked(),
                error = %err,
                "failed to record send timestamp; cooldown will not apply"
            );
        }

        info!(
            email = %email.masked(),
            client_ip = ip,
            language = language.code(),
            outcome = "SUCCESS",
            "password reset dispatched"
        );

        Ok(confirmation_message(kind, language))
    }

    /// Builds the frontend reset-page link embedded in the email.
    fn reset_link(&self, email: &EmailAddress, language: Language) -> String {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("email", email.as_str())
            .append_pair("lang", language.code())
            .finish();
        format!("{}/auth/reset-password?{}", self.frontend_url, query)
    }
}

fn confirmation_message(kind: ResetKind, language: Language) -> String {
    match (kind, language) {
        (ResetKind::Initiate, Language::En) => {
            "If an account exists with this email, you will receive a password reset link."
        }
        (ResetKind::Resend, Language::En) => {
            "If an account exists with this email, a new password reset link has been sent."
        }
        (ResetKind::Initiate, Language::De) => {
            "Falls ein Konto mit dieser E-Mail-Adresse existiert, erhalten Sie einen Link zum Zur\u{fc}cksetzen des Passworts."
        }
        (ResetKind::Resend, Language::De) => {
            "Falls ein Konto mit dieser E-Mail-Adresse existiert, wurde ein neuer Link zum Zur\u{fc}cksetzen des Passworts gesendet."
        }
    }
    .to_string()
}

fn budget_message(language: Language, retry_after_secs: u64) -> String {
    let minutes = retry_after_secs.div_ceil(60).max(1);
    match language {
        Language::En => format!(
            "Too many password reset requests. Please try again in {minutes} minute(s)."
        ),
        Language::De => format!(
            "Zu viele Anfragen zum Zur\u{fc}cksetzen des Passworts. Bitte versuchen Sie es in {minutes} Minute(n) erneut."
        ),
    }
}

fn cooldown_message(language: Language, retry_after_secs: u64) -> String {
    match language {
        Language::En => format!(
            "A reset link was sent recently. Please wait {retry_after_secs} seconds before requesting another."
        ),
        Language::De => format!(
            "Ein Link wurde k\u{fc}rzlich gesendet. Bitte warten Sie {retry_after_secs} Sekunden, bevor Sie einen neuen anfordern."
        ),
    }
}

#[cfg(test)]
mod tests {
    use futures::future::join_all;

    use super::*;
    use crate::adapters::identity::MockIdentityProvider;
    use crate::adapters::rate_limiter::{InMemoryResetRateLimiter, ResetLimits};
    use crate::domain::ProviderError;

    fn service_with(
        limits: ResetLimits,
        provider: MockIdentityProvider,
    ) -> (PasswordResetService, Arc<InMemoryResetRateLimiter>) {
        let limiter = Arc::new(InMemoryResetRateLimiter::new(limits));
        let service = PasswordResetService::new(
            limiter.clone(),
            Arc::new(provider),
            "http://localhost:3000",
        );
        (service, limiter)
    }

    fn no_cooldown_limits() -> ResetLimits {
        ResetLimits {
            max_attempts: 3,
            window_secs: 3600,
            cooldown_secs: 0,
        }
    }

    #[tokio::test]
    async fn same_message_regardless_of_account_existence() {
        // The provider swallows unknown recipients, so from the service's
        // point of view both cases are a plain Ok. Two different addresses
        // must still produce byte-identical confirmations.
        let (service, _) = service_with(no_cooldown_limits(), MockIdentityProvider::new());

        let a = service
            .request_reset("exists@example.com", ResetKind::Initiate, Language::En, None)
            .await
            .unwrap();
        let b = service
            .request_reset("ghost@example.com", ResetKind::Initiate, Language::En, None)
            .await
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(
            a,
            "If an account exists with this email, you will receive a password reset link."
        );
    }

    #[tokio::test]
    async fn invalid_email_short_circuits_before_any_port() {
        let provider = Arc::new(MockIdentityProvider::new());
        let limiter = Arc::new(InMemoryResetRateLimiter::new(no_cooldown_limits()));
        let service =
            PasswordResetService::new(limiter.clone(), provider.clone(), "http://localhost:3000");

        let err = service
            .request_reset("not-an-email", ResetKind::Initiate, Language::En, None)
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Validation(_)));
        assert_eq!(provider.call_count(), 0);
        // A rejected email must not have consumed budget for anyone.
        assert!(limiter
            .check_and_increment("not-an-email")
            .await
            .unwrap()
            .is_allowed());
    }

    #[tokio::test]
    async fn dispatch_carries_link_with_encoded_email_and_lang() {
        let provider = Arc::new(MockIdentityProvider::new());
        let limiter = Arc::new(InMemoryResetRateLimiter::new(no_cooldown_limits()));
        let service = PasswordResetService::new(
            limiter,
            provider.clone(),
            "https://app.example.org/",
        );

        service
            .request_reset("User+Tag@Example.COM", ResetKind::Initiate, Language::De, None)
            .await
            .unwrap();

        let dispatches = provider.dispatches();
        assert_eq!(dispatches.len(), 1);
        assert_eq!(dispatches[0].email.as_str(), "user+tag@example.com");
        assert_eq!(dispatches[0].language, Language::De);
        assert_eq!(
            dispatches[0].reset_link,
            "https://app.example.org/auth/reset-password?email=user%2Btag%40example.com&lang=de"
        );
    }

    #[tokio::test]
    async fn fourth_attempt_within_window_is_rejected() {
        let (service, _) = service_with(no_cooldown_limits(), MockIdentityProvider::new());

        for _ in 0..3 {
            service
                .request_reset("burst@example.com", ResetKind::Initiate, Language::En, None)
                .await
                .unwrap();
        }

        let err = service
            .request_reset("burst@example.com", ResetKind::Initiate, Language::En, None)
            .await
            .unwrap_err();

        match err {
            GatewayError::RateLimitExceeded { retry_after_secs, .. } => {
                assert!(retry_after_secs > 0 && retry_after_secs <= 3600);
            }
            other => panic!("expected rate-limit rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn provider_failure_surfaces_and_still_burns_budget() {
        let provider =
            MockIdentityProvider::new().with_error(ProviderError::Unreachable("timeout".into()));
        let (service, _) = service_with(no_cooldown_limits(), provider);

        for _ in 0..3 {
            let err = service
                .request_reset("down@example.com", ResetKind::Initiate, Language::En, None)
                .await
                .unwrap_err();
            assert!(matches!(err, GatewayError::Provider(_)));
        }

        // The three failed dispatches consumed the whole budget.
        let err = service
            .request_reset("down@example.com", ResetKind::Initiate, Language::En, None)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::RateLimitExceeded { .. }));
    }

    #[tokio::test]
    async fn resend_inside_cooldown_is_rejected_without_burning_budget() {
        let limits = ResetLimits {
            max_attempts: 3,
            window_secs: 3600,
            cooldown_secs: 60,
        };
        let limiter = Arc::new(InMemoryResetRateLimiter::new(limits));
        let service = PasswordResetService::new(
            limiter.clone(),
            Arc::new(MockIdentityProvider::new()),
            "http://localhost:3000",
        );

        service
            .request_reset("slow@example.com", ResetKind::Initiate, Language::En, None)
            .await
            .unwrap();

        let err = service
            .request_reset("slow@example.com", ResetKind::Resend, Language::En, None)
            .await
            .unwrap_err();
        match err {
            GatewayError::RateLimitExceeded { retry_after_secs, .. } => {
                assert!(retry_after_secs > 0 && retry_after_secs <= 60);
            }
            other => panic!("expected cooldown rejection, got {other:?}"),
        }

        // Once the cooldown lapses the remaining two attempts are intact.
        limiter.advance(61);
        service
            .request_reset("slow@example.com", ResetKind::Resend, Language::En, None)
            .await
            .unwrap();
        limiter.advance(61);
        service
            .request_reset("slow@example.com", ResetKind::Resend, Language::En, None)
            .await
            .unwrap();
        limiter.advance(61);
        let err = service
            .request_reset("slow@example.com", ResetKind::Resend, Language::En, None)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::RateLimitExceeded { .. }));
    }

    #[tokio::test]
    async fn concurrent_requests_never_exceed_the_budget() {
        let provider = Arc::new(MockIdentityProvider::new());
        let limiter = Arc::new(InMemoryResetRateLimiter::new(no_cooldown_limits()));
        let service = Arc::new(PasswordResetService::new(
            limiter,
            provider.clone(),
            "http://localhost:3000",
        ));

        let calls = (0..10).map(|_| {
            let service = service.clone();
            async move {
                service
                    .request_reset("race@example.com", ResetKind::Initiate, Language::En, None)
                    .await
            }
        });
        let results = join_all(calls).await;

        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 3);
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn german_messages_for_german_callers() {
        let (service, _) = service_with(no_cooldown_limits(), MockIdentityProvider::new());

        let msg = service
            .request_reset("de@example.com", ResetKind::Resend, Language::De, None)
            .await
            .unwrap();
        assert!(msg.contains("neuer Link"));
    }
}
