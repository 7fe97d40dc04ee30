//! Ordered pre-dispatch interceptors.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

use crate::command::domain::Interaction;

/// Decision returned by an interceptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiddlewareFlow {
    /// Run the next interceptor, then dispatch.
    Continue,
    /// Skip remaining interceptors and dispatch for this interaction.
    Stop,
}

/// Error raised by an interceptor.
///
/// Propagates to the caller of [`InteractionDispatcher::handle`]; no
/// failure event fires for it.
///
/// [`InteractionDispatcher::handle`]: super::InteractionDispatcher::handle
#[derive(Debug, Clone, Error)]
#[error("middleware failed: {0}")]
pub struct MiddlewareError(Arc<dyn std::error::Error + Send + Sync>);

impl MiddlewareError {
    /// Wraps an arbitrary interceptor error.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }

    /// Creates an error from a plain message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(std::io::Error::other(message.into()))
    }
}

/// Result type for interceptors.
pub type MiddlewareResult = Result<MiddlewareFlow, MiddlewareError>;

/// Pre-dispatch interceptor.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Inspects the interaction and decides whether processing continues.
    async fn intercept(&self, interaction: &Interaction) -> MiddlewareResult;
}

/// Shared, type-erased interceptor.
pub type SharedMiddleware = Arc<dyn Middleware>;

/// Interceptor backed by an async closure.
pub struct MiddlewareFn<F>(F);

#[async_trait]
impl<F, Fut> Middleware for MiddlewareFn<F>
where
    F: Fn(Interaction) -> Fut + Send + Sync,
    Fut: Future<Output = MiddlewareResult> + Send,
{
    async fn intercept(&self, interaction: &Interaction) -> MiddlewareResult {
        (self.0)(interaction.clone()).await
    }
}

/// Wraps an async closure as a [`SharedMiddleware`].
pub fn middleware_fn<F, Fut>(interceptor: F) -> SharedMiddleware
where
    F: Fn(Interaction) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MiddlewareResult> + Send + 'static,
{
    Arc::new(MiddlewareFn(interceptor))
}

/// Interceptors in registration order.
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    entries: Vec<SharedMiddleware>,
}

impl MiddlewareChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interceptor.
    pub fn push(&mut self, middleware: SharedMiddleware) {
        self.entries.push(middleware);
    }

    /// Returns the number of interceptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the chain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs interceptors one at a time until one stops or fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`MiddlewareError`]; later interceptors do not run.
    pub async fn run(&self, interaction: &Interaction) -> MiddlewareResult {
        for middleware in &self.entries {
            if middleware.intercept(interaction).await? == MiddlewareFlow::Stop {
                return Ok(MiddlewareFlow::Stop);
            }
        }
        Ok(MiddlewareFlow::Continue)
    }
}
