//! Mock identity provider for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ProviderError;
use crate::ports::{IdentityProvider, PasswordResetDispatch};

/// Records every dispatch and optionally fails with a forced error.
///
/// By default every call succeeds, mirroring a provider that tolerates
/// unknown recipients silently.
#[derive(Debug, Default)]
pub struct MockIdentityProvider {
    dispatches: Mutex<Vec<PasswordResetDispatch>>,
    force_error: Mutex<Option<ProviderError>>,
}

impl MockIdentityProvider {
    /// Creates a provider that accepts every dispatch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces all future calls to fail with the given error.
    pub fn with_error(self, error: ProviderError) -> Self {
        *self.force_error.lock().unwrap() = Some(error);
        self
    }

    /// Returns the dispatches seen so far.
    pub fn dispatches(&self) -> Vec<PasswordResetDispatch> {
        self.dispatches.lock().unwrap().clone()
    }

    /// Number of calls received.
    pub fn call_count(&self) -> usize {
        self.dispatches.lock().unwrap().len()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn initiate_password_reset(
        &self,
        dispatch: &PasswordResetDispatch,
    ) -> Result<(), ProviderError> {
        self.dispatches.lock().unwrap().push(dispatch.clone());
        match self.force_error.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
