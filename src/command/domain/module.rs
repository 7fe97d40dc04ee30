//! Raw command modules as produced by discovery collaborators.
//!
//! A module exposes its exports either nested under `default` or at the top
//! level. Both shapes are normalized into a [`CommandDescriptor`] here so the
//! registry and dispatcher only ever see the canonical type.

use super::{CommandDescriptor, CommandMetadata, SharedHandler};

/// Exports of a command module. Every field is optional at this stage.
#[derive(Clone, Default)]
pub struct CommandExports {
    /// Command metadata.
    pub data: Option<CommandMetadata>,
    /// Primary handler.
    pub command: Option<SharedHandler>,
    /// Autocomplete handler.
    pub autocomplete: Option<SharedHandler>,
    /// Button handler.
    pub button: Option<SharedHandler>,
    /// Generic context-menu handler.
    pub context_menu: Option<SharedHandler>,
    /// Message context-menu handler.
    pub message_context_menu: Option<SharedHandler>,
    /// User context-menu handler.
    pub user_context_menu: Option<SharedHandler>,
}

impl CommandExports {
    /// Creates exports carrying metadata and a primary handler.
    #[must_use]
    pub fn new(data: CommandMetadata, command: SharedHandler) -> Self {
        Self {
            data: Some(data),
            command: Some(command),
            ..Self::default()
        }
    }

    /// Sets the autocomplete handler.
    #[must_use]
    pub fn with_autocomplete(mut self, handler: SharedHandler) -> Self {
        self.autocomplete = Some(handler);
        self
    }

    /// Sets the button handler.
    #[must_use]
    pub fn with_button(mut self, handler: SharedHandler) -> Self {
        self.button = Some(handler);
        self
    }

    /// Sets the generic context-menu handler.
    #[must_use]
    pub fn with_context_menu(mut self, handler: SharedHandler) -> Self {
        self.context_menu = Some(handler);
        self
    }

    /// Sets the message context-menu handler.
    #[must_use]
    pub fn with_message_context_menu(mut self, handler: SharedHandler) -> Self {
        self.message_context_menu = Some(handler);
        self
    }

    /// Sets the user context-menu handler.
    #[must_use]
    pub fn with_user_context_menu(mut self, handler: SharedHandler) -> Self {
        self.user_context_menu = Some(handler);
        self
    }

    /// Returns `true` when both metadata and a primary handler are present.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.data.is_some() && self.command.is_some()
    }

    fn into_descriptor(self) -> Option<CommandDescriptor> {
        let (Some(data), Some(command)) = (self.data, self.command) else {
            return None;
        };

        let mut descriptor = CommandDescriptor::new(data, command);
        if let Some(handler) = self.autocomplete {
            descriptor = descriptor.with_autocomplete(handler);
        }
        if let Some(handler) = self.button {
            descriptor = descriptor.with_button(handler);
        }
        if let Some(handler) = self.context_menu {
            descriptor = descriptor.with_context_menu(handler);
        }
        if let Some(handler) = self.message_context_menu {
            descriptor = descriptor.with_message_context_menu(handler);
        }
        if let Some(handler) = self.user_context_menu {
            descriptor = descriptor.with_user_context_menu(handler);
        }
        Some(descriptor)
    }
}

/// A command module in either of the two accepted shapes.
#[derive(Clone, Default)]
pub struct CommandModule {
    /// Exports nested under a `default` field.
    pub default: Option<CommandExports>,
    /// Exports at the top level.
    pub exports: CommandExports,
}

impl CommandModule {
    /// Creates a module exposing its exports at the top level.
    #[must_use]
    pub fn flat(exports: CommandExports) -> Self {
        Self {
            default: None,
            exports,
        }
    }

    /// Creates a module exposing its exports under `default`.
    #[must_use]
    pub fn wrapped(exports: CommandExports) -> Self {
        Self {
            default: Some(exports),
            exports: CommandExports::default(),
        }
    }

    /// Normalizes the module into a descriptor.
    ///
    /// Complete `default` exports win over top-level exports. Returns `None`
    /// when neither shape carries both metadata and a primary handler.
    #[must_use]
    pub fn into_descriptor(self) -> Option<CommandDescriptor> {
        match self.default {
            Some(default) if default.is_complete() => default.into_descriptor(),
            _ => self.exports.into_descriptor(),
        }
    }
}
