//! Password-reset HTTP surface.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::AuthState;
pub use routes::auth_routes;
