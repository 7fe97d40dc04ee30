//! Switchyard: command-dispatch core for interaction-driven clients.
//!
//! This crate discovers named command handlers, registers their metadata
//! with a remote registration service, and routes inbound interactions to
//! the correct handler through an ordered middleware pipeline with
//! success/failure hooks.
//!
//! # Architecture
//!
//! Switchyard follows hexagonal architecture principles:
//!
//! - **Domain**: Command descriptors, metadata, and interactions
//! - **Ports**: Abstract traits for command discovery and remote registration
//! - **Adapters**: In-memory and manifest-file implementations of the ports
//!
//! # Modules
//!
//! - [`command`]: Registry, middleware, dispatch, and registration sync
//! - [`telemetry`]: Structured logging initialisation

pub mod command;
pub mod telemetry;
