//! Domain types for the gateway edge pipeline.
//!
//! Everything here is pure: no I/O, no clocks beyond what callers pass in.
//! The adapters wire these types to axum, reqwest, and Redis.

pub mod correlation;
pub mod email;
pub mod errors;
pub mod language;
pub mod routing;
pub mod user_context;
pub mod version;

pub use correlation::CorrelationId;
pub use email::EmailAddress;
pub use errors::{GatewayError, ProviderError, RateLimitStoreError, RoutingError, ValidationError};
pub use language::Language;
pub use routing::{BackendService, RouteTable};
pub use user_context::UserContext;
pub use version::ApiVersion;
