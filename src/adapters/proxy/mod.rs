//! Request proxying - transformation and backend dispatch.
//!
//! - `transform` - pure outbound-header enrichment
//! - `reqwest_client` - `BackendClient` over reqwest
//! - `handler` - axum fallback handler tying resolve, transform, dispatch together

mod handler;
mod reqwest_client;
mod transform;

pub use handler::{proxy_request, ProxyState};
pub use reqwest_client::ReqwestBackendClient;
pub use transform::transform_headers;
