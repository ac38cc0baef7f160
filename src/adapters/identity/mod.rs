//! Identity provider adapters.
//!
//! - `cognito` - AWS Cognito forgot-password integration over reqwest
//! - `mock` - in-memory provider for tests

mod cognito;
mod mock;

pub use cognito::CognitoIdentityProvider;
pub use mock::MockIdentityProvider;
