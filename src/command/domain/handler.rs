//! Handler contract invoked for a resolved interaction.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

use super::Interaction;

/// Error reported by a command handler.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct HandlerError(Arc<dyn std::error::Error + Send + Sync>);

impl HandlerError {
    /// Wraps an arbitrary error raised by handler code.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }

    /// Creates an error from a plain message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(std::io::Error::other(message.into()))
    }
}

/// Result type for handler invocations.
pub type HandlerResult = Result<(), HandlerError>;

/// Async handler for one interaction subtype of one command.
#[async_trait]
pub trait InteractionHandler: Send + Sync {
    /// Handles the interaction.
    async fn handle(&self, interaction: &Interaction) -> HandlerResult;
}

/// Shared, type-erased handler as stored in descriptors.
pub type SharedHandler = Arc<dyn InteractionHandler>;

/// Handler backed by an async closure.
pub struct HandlerFn<F>(F);

#[async_trait]
impl<F, Fut> InteractionHandler for HandlerFn<F>
where
    F: Fn(Interaction) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send,
{
    async fn handle(&self, interaction: &Interaction) -> HandlerResult {
        (self.0)(interaction.clone()).await
    }
}

/// Wraps an async closure as a [`SharedHandler`].
///
/// The closure receives an owned copy of the interaction so the returned
/// future may outlive the borrow held by the dispatcher.
pub fn handler_fn<F, Fut>(handler: F) -> SharedHandler
where
    F: Fn(Interaction) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(HandlerFn(handler))
}
