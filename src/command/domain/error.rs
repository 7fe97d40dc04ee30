//! Error types for command domain validation and dispatch.

use super::{CommandName, HandlerError, InteractionKind};
use thiserror::Error;

/// Errors returned while constructing command domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandDomainError {
    /// The command name is empty after trimming.
    #[error("command name must not be empty")]
    EmptyCommandName,

    /// The command name contains characters outside `[a-z0-9_-]`.
    #[error(
        "command name '{0}' contains invalid characters (only lowercase alphanumeric, '-' and '_' allowed)"
    )]
    InvalidCommandName(String),

    /// The command name exceeds the 32-character limit.
    #[error("command name exceeds 32 character limit: {0}")]
    CommandNameTooLong(String),

    /// An option name failed validation.
    #[error("invalid option name '{0}'")]
    InvalidOptionName(String),

    /// An identifier is empty after trimming.
    #[error("{kind} identifier must not be empty")]
    EmptyIdentifier {
        /// Identifier kind (`application` or `group`).
        kind: &'static str,
    },

    /// An identifier is not a run of ASCII digits.
    #[error("{kind} identifier '{value}' must contain only digits")]
    InvalidIdentifier {
        /// Identifier kind (`application` or `group`).
        kind: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// Errors raised while resolving or invoking a command handler.
///
/// These are never returned to the interaction source; they are delivered to
/// listeners on the failure channel.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// No descriptor is registered under the interaction's command name.
    #[error("couldn't find command with name '{0}'")]
    CommandNotFound(String),

    /// The resolved handler returned an error.
    #[error("{kind} handler for command '{command}' failed: {source}")]
    Handler {
        /// Command whose handler failed.
        command: CommandName,
        /// Interaction subtype that was being handled.
        kind: InteractionKind,
        /// Error reported by the handler.
        source: HandlerError,
    },
}

impl DispatchError {
    /// Returns `true` when the command could not be resolved.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::CommandNotFound(_))
    }
}
