//! Canonical command descriptor held by the registry.

use std::collections::HashMap;
use std::fmt;

use super::{CommandMetadata, CommandName, InteractionKind, SharedHandler};

/// A registered command: metadata plus its handlers.
///
/// The primary handler serves [`InteractionKind::Command`]; the remaining
/// routable subtypes each have an optional slot.
#[derive(Clone)]
pub struct CommandDescriptor {
    metadata: CommandMetadata,
    command: SharedHandler,
    subtype_handlers: HashMap<InteractionKind, SharedHandler>,
}

impl CommandDescriptor {
    /// Creates a descriptor with only the primary handler.
    #[must_use]
    pub fn new(metadata: CommandMetadata, command: SharedHandler) -> Self {
        Self {
            metadata,
            command,
            subtype_handlers: HashMap::new(),
        }
    }

    /// Sets the autocomplete handler.
    #[must_use]
    pub fn with_autocomplete(self, handler: SharedHandler) -> Self {
        self.with_subtype(InteractionKind::Autocomplete, handler)
    }

    /// Sets the button handler.
    #[must_use]
    pub fn with_button(self, handler: SharedHandler) -> Self {
        self.with_subtype(InteractionKind::Button, handler)
    }

    /// Sets the generic context-menu handler.
    #[must_use]
    pub fn with_context_menu(self, handler: SharedHandler) -> Self {
        self.with_subtype(InteractionKind::ContextMenu, handler)
    }

    /// Sets the message context-menu handler.
    #[must_use]
    pub fn with_message_context_menu(self, handler: SharedHandler) -> Self {
        self.with_subtype(InteractionKind::MessageContextMenu, handler)
    }

    /// Sets the user context-menu handler.
    #[must_use]
    pub fn with_user_context_menu(self, handler: SharedHandler) -> Self {
        self.with_subtype(InteractionKind::UserContextMenu, handler)
    }

    fn with_subtype(mut self, kind: InteractionKind, handler: SharedHandler) -> Self {
        self.subtype_handlers.insert(kind, handler);
        self
    }

    /// Returns the command name.
    #[must_use]
    pub const fn name(&self) -> &CommandName {
        &self.metadata.name
    }

    /// Returns the command metadata.
    #[must_use]
    pub const fn metadata(&self) -> &CommandMetadata {
        &self.metadata
    }

    /// Returns the handler registered for an interaction subtype, if any.
    #[must_use]
    pub fn handler_for(&self, kind: InteractionKind) -> Option<&SharedHandler> {
        match kind {
            InteractionKind::Command => Some(&self.command),
            InteractionKind::Unknown => None,
            _ => self.subtype_handlers.get(&kind),
        }
    }

    /// Returns the routable subtypes this descriptor can serve.
    #[must_use]
    pub fn supported_kinds(&self) -> Vec<InteractionKind> {
        InteractionKind::ROUTABLE
            .into_iter()
            .filter(|kind| self.handler_for(*kind).is_some())
            .collect()
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CommandDescriptor")
            .field("metadata", &self.metadata)
            .field("supported_kinds", &self.supported_kinds())
            .finish_non_exhaustive()
    }
}
