//! HTTP adapters: routes, middleware, and error mapping.

pub mod auth;
pub mod client_ip;
pub mod error;
pub mod middleware;
pub mod router;

pub use auth::AuthState;
pub use error::ErrorBody;
pub use router::build_router;
