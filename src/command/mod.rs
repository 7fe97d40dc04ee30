//! Command discovery, interaction dispatch, and remote registration.
//!
//! Commands are discovered from directories through a [`ports::CommandSource`],
//! held in a per-dispatcher registry, and pushed to the remote registration
//! service through a [`ports::CommandRegistrar`]. Inbound interactions run
//! through an ordered middleware chain before the dispatcher resolves and
//! invokes the handler for their subtype. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use mockable::DefaultClock;
//! use switchyard::command::{
//!     adapters::memory::{InMemoryCommandRegistrar, InMemoryCommandSource},
//!     config::DispatcherConfig,
//!     domain::{
//!         ApplicationId, CommandExports, CommandMetadata, CommandModule, CommandName,
//!         Credential, Interaction, InteractionKind, handler_fn,
//!     },
//!     services::{DispatchOutcome, InteractionDispatcher},
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = InMemoryCommandSource::new();
//! let metadata = CommandMetadata::new(CommandName::new("ping")?, "Replies with pong");
//! let handler = handler_fn(|_interaction| async { Ok(()) });
//! source.insert_module("commands", "ping", CommandModule::flat(CommandExports::new(metadata, handler)))?;
//!
//! let config = DispatcherConfig::new(ApplicationId::new("1234")?, Credential::new("token"))
//!     .with_directories(["commands"]);
//! let dispatcher = InteractionDispatcher::new(
//!     config,
//!     Arc::new(source),
//!     Arc::new(InMemoryCommandRegistrar::new()),
//!     Arc::new(DefaultClock),
//! );
//!
//! let interaction = Interaction::new("ping", InteractionKind::Command, &DefaultClock);
//! let outcome = dispatcher.handle(&interaction).await?;
//! assert!(matches!(outcome, DispatchOutcome::Handled));
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
