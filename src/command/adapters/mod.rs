//! Adapter implementations for command discovery and registration ports.

pub mod manifest;
pub mod memory;

pub use manifest::{HandlerTable, ManifestCommandSource};
