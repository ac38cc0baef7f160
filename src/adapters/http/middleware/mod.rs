//! HTTP middleware for axum.
//!
//! Cross-cutting edge concerns, assembled as an explicit ordered stack at
//! startup (correlation outermost, then version tagging):
//!
//! - `correlation` - correlation id stamping and task-scoped binding
//! - `version` - API version extraction and response tagging

pub mod correlation;
pub mod version;

pub use correlation::{correlation_middleware, CORRELATION_ID_HEADER};
pub use version::{version_middleware, API_VERSION_HEADER};
