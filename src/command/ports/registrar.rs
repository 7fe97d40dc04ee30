//! Registration service port for bulk-replacing remote command metadata.

use crate::command::domain::{ApplicationId, Credential, GroupId};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for registration service operations.
pub type RegistrarResult<T> = Result<T, RegistrarError>;

/// Breadth of a command registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegistrationScope {
    /// Commands visible everywhere the application is installed.
    Global,
    /// Commands visible only inside one group.
    Group(GroupId),
}

impl fmt::Display for RegistrationScope {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => formatter.write_str("global"),
            Self::Group(group_id) => write!(formatter, "group:{group_id}"),
        }
    }
}

/// A bulk-replace call: the full command list for one scope.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationRequest {
    /// Application owning the commands.
    pub application_id: ApplicationId,
    /// Secret used to authenticate the call.
    pub credential: Credential,
    /// Scope being replaced.
    pub scope: RegistrationScope,
    /// Serialized command metadata, in registry order.
    pub commands: Vec<Value>,
}

/// Remote registration service.
#[async_trait]
pub trait CommandRegistrar: Send + Sync {
    /// Replaces all remote commands in the request scope with the request's
    /// command list.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError`] when the remote service rejects the call or
    /// the transport fails.
    async fn bulk_overwrite(&self, request: &RegistrationRequest) -> RegistrarResult<()>;
}

/// Errors returned by registration service adapters.
#[derive(Debug, Clone, Error)]
pub enum RegistrarError {
    /// The remote service refused the credential.
    #[error("registration service rejected the credential")]
    Unauthorized,

    /// The remote service rejected the payload.
    #[error("registration service rejected the request ({status}): {message}")]
    Rejected {
        /// Status code reported by the service.
        status: u16,
        /// Service-provided message.
        message: String,
    },

    /// The transport failed before a response arrived.
    #[error("registration transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl RegistrarError {
    /// Wraps a transport-level failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
