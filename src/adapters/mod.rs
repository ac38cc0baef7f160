//! Adapters binding the ports to concrete infrastructure.

pub mod http;
pub mod identity;
pub mod proxy;
pub mod rate_limiter;
