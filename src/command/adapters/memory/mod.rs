//! In-memory adapters for command discovery and registration.

mod registrar;
mod source;

pub use registrar::InMemoryCommandRegistrar;
pub use source::InMemoryCommandSource;
