//! In-memory registration service for tests and offline runs.

use crate::command::ports::{
    CommandRegistrar, RegistrarError, RegistrarResult, RegistrationRequest, RegistrationScope,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, RwLock};

/// In-memory registration service.
///
/// Models bulk-replace semantics per scope and records every call it
/// receives, including rejected ones.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommandRegistrar {
    state: Arc<RwLock<InMemoryRegistrarState>>,
}

#[derive(Debug, Default)]
struct InMemoryRegistrarState {
    requests: Vec<RegistrationRequest>,
    remote_commands: HashMap<RegistrationScope, Vec<Value>>,
    failure: Option<RegistrarError>,
}

impl InMemoryCommandRegistrar {
    /// Creates a registrar with no remote commands.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `error`, or succeed when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Transport`] when lock acquisition fails.
    pub fn set_failure(&self, error: Option<RegistrarError>) -> RegistrarResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| RegistrarError::transport(io::Error::other(err.to_string())))?;
        state.failure = error;
        Ok(())
    }

    /// Returns every request received, in call order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Transport`] when lock acquisition fails.
    pub fn requests(&self) -> RegistrarResult<Vec<RegistrationRequest>> {
        let state = self
            .state
            .read()
            .map_err(|err| RegistrarError::transport(io::Error::other(err.to_string())))?;
        Ok(state.requests.clone())
    }

    /// Returns the commands currently registered for a scope.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Transport`] when lock acquisition fails.
    pub fn remote_commands(&self, scope: &RegistrationScope) -> RegistrarResult<Option<Vec<Value>>> {
        let state = self
            .state
            .read()
            .map_err(|err| RegistrarError::transport(io::Error::other(err.to_string())))?;
        Ok(state.remote_commands.get(scope).cloned())
    }
}

#[async_trait]
impl CommandRegistrar for InMemoryCommandRegistrar {
    async fn bulk_overwrite(&self, request: &RegistrationRequest) -> RegistrarResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| RegistrarError::transport(io::Error::other(err.to_string())))?;

        state.requests.push(request.clone());
        if let Some(error) = state.failure.clone() {
            return Err(error);
        }

        state
            .remote_commands
            .insert(request.scope.clone(), request.commands.clone());
        Ok(())
    }
}
