//! Payload construction and reporting for remote command refreshes.

use serde_json::Value;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use thiserror::Error;

use crate::command::ports::RegistrationScope;

/// Errors that reject a refresh before any remote call is made.
#[derive(Debug, Clone, Error)]
pub enum RefreshError {
    /// A group-scoped refresh was requested without a configured group.
    #[error(
        "cannot refresh group commands because a group id was not configured; supply a group id or run a global refresh instead"
    )]
    MissingGroupId,

    /// Command metadata could not be serialized.
    #[error("failed to serialize command metadata: {0}")]
    Serialization(Arc<serde_json::Error>),
}

/// Result of a refresh that passed local validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    scope: RegistrationScope,
    command_count: usize,
    payload_digest: String,
    synced: bool,
}

impl RefreshReport {
    pub(crate) const fn new(
        scope: RegistrationScope,
        command_count: usize,
        payload_digest: String,
        synced: bool,
    ) -> Self {
        Self {
            scope,
            command_count,
            payload_digest,
            synced,
        }
    }

    /// Returns the scope that was replaced.
    #[must_use]
    pub const fn scope(&self) -> &RegistrationScope {
        &self.scope
    }

    /// Returns the number of commands sent.
    #[must_use]
    pub const fn command_count(&self) -> usize {
        self.command_count
    }

    /// Returns the hex SHA-256 digest of the serialized payload.
    #[must_use]
    pub fn payload_digest(&self) -> &str {
        &self.payload_digest
    }

    /// Returns `true` when the registration service accepted the payload.
    #[must_use]
    pub const fn synced(&self) -> bool {
        self.synced
    }
}

/// Computes the hex SHA-256 digest of a serialized command list.
///
/// # Errors
///
/// Returns [`RefreshError::Serialization`] when the list cannot be encoded.
pub fn payload_digest(commands: &[Value]) -> Result<String, RefreshError> {
    let encoded =
        serde_json::to_vec(commands).map_err(|err| RefreshError::Serialization(Arc::new(err)))?;
    let mut hasher = Sha256::new();
    hasher.update(&encoded);
    Ok(hex::encode(hasher.finalize()))
}
