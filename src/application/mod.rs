//! Application services orchestrating domain logic over the ports.

pub mod password_reset;

pub use password_reset::{PasswordResetService, ResetKind};
