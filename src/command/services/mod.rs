//! Application services for command discovery, dispatch, and registration.
//!
//! The [`InteractionDispatcher`] owns the registry, middleware chain, and
//! listener lists, and coordinates the discovery and registration ports.

mod discovery;
mod dispatcher;
mod events;
mod middleware;
mod registry;
mod synchronizer;

pub use discovery::{DiscoveryError, LoadReport};
pub(crate) use discovery::DISCOVERY_TARGET;
#[cfg(test)]
pub(crate) use discovery::load_directory;
pub(crate) use dispatcher::DISPATCH_TARGET;
pub use dispatcher::{DispatchOutcome, InteractionDispatcher};
pub use events::{EventBus, EventChannel, Listener, listener};
pub use middleware::{
    Middleware, MiddlewareChain, MiddlewareError, MiddlewareFlow, MiddlewareFn, MiddlewareResult,
    SharedMiddleware, middleware_fn,
};
pub use registry::CommandRegistry;
pub use synchronizer::{RefreshError, RefreshReport, payload_digest};
