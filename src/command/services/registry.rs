//! In-memory command registry owned by a dispatcher.

use std::collections::HashMap;

use serde_json::Value;

use crate::command::domain::{CommandDescriptor, CommandMetadata, CommandName};

/// Mapping from command name to descriptor.
///
/// Lookups ignore insertion order; iteration follows first-insertion order,
/// which is also the order of the serialized refresh payload. Overwriting a
/// name keeps its first position.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<CommandName, CommandDescriptor>,
    order: Vec<CommandName>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a descriptor, replacing any descriptor with the same name.
    ///
    /// Returns the replaced descriptor.
    pub fn insert(&mut self, descriptor: CommandDescriptor) -> Option<CommandDescriptor> {
        let name = descriptor.name().clone();
        let previous = self.commands.insert(name.clone(), descriptor);
        if previous.is_none() {
            self.order.push(name);
        }
        previous
    }

    /// Finds a descriptor by name, ignoring ASCII case.
    ///
    /// This is looser than exact-name routing: `PING` resolves to the `ping`
    /// descriptor. Stored names are already lowercase, so only the incoming
    /// name is folded.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name.to_ascii_lowercase().as_str())
    }

    /// Returns `true` when a descriptor is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` when no commands are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates command names in first-insertion order.
    pub fn names(&self) -> impl Iterator<Item = &CommandName> {
        self.order.iter()
    }

    /// Iterates descriptors in first-insertion order.
    pub fn descriptors(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.order.iter().filter_map(|name| self.commands.get(name))
    }

    /// Iterates command metadata in first-insertion order.
    pub fn metadata(&self) -> impl Iterator<Item = &CommandMetadata> {
        self.descriptors().map(CommandDescriptor::metadata)
    }

    /// Serializes every command's metadata into its wire representation.
    ///
    /// # Errors
    ///
    /// Returns the first [`serde_json::Error`] encountered.
    pub fn serialize_metadata(&self) -> Result<Vec<Value>, serde_json::Error> {
        self.metadata().map(CommandMetadata::to_wire).collect()
    }
}
