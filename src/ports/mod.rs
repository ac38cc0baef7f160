//! Ports - trait interfaces between orchestration and infrastructure.
//!
//! Adapters implement these against real infrastructure (reqwest, Redis,
//! Cognito); tests implement them with mocks.

mod backend_client;
mod identity_provider;
mod reset_rate_limiter;

pub use backend_client::{BackendClient, DispatchError, ProxyRequest, ProxyResponse};
pub use identity_provider::{IdentityProvider, PasswordResetDispatch};
pub use reset_rate_limiter::{RateLimitDecision, ResetRateLimiter};
