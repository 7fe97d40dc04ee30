//! Inbound interaction model.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::InteractionId;

/// Subtype discriminant of an inbound interaction.
///
/// The recognised set is closed; any other wire value deserializes to
/// [`InteractionKind::Unknown`] and is ignored by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// Plain command invocation.
    Command,
    /// Autocomplete request for a command option.
    Autocomplete,
    /// Button press on a component owned by a command.
    Button,
    /// Generic context-menu action.
    ContextMenu,
    /// Context-menu action on a message.
    MessageContextMenu,
    /// Context-menu action on a user.
    UserContextMenu,
    /// Any subtype the dispatcher does not route.
    #[serde(other)]
    Unknown,
}

impl InteractionKind {
    /// Every routable subtype, in classification order.
    pub const ROUTABLE: [Self; 6] = [
        Self::Command,
        Self::Autocomplete,
        Self::Button,
        Self::ContextMenu,
        Self::MessageContextMenu,
        Self::UserContextMenu,
    ];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Autocomplete => "autocomplete",
            Self::Button => "button",
            Self::ContextMenu => "context_menu",
            Self::MessageContextMenu => "message_context_menu",
            Self::UserContextMenu => "user_context_menu",
            Self::Unknown => "unknown",
        }
    }

    /// Returns `true` for subtypes the dispatcher routes to a handler.
    #[must_use]
    pub const fn is_routable(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A single inbound user action routed to one command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    id: InteractionId,
    command_name: String,
    kind: InteractionKind,
    #[serde(default)]
    payload: Value,
    received_at: DateTime<Utc>,
}

impl Interaction {
    /// Creates an interaction stamped with the clock's current time.
    #[must_use]
    pub fn new(command_name: impl Into<String>, kind: InteractionKind, clock: &impl Clock) -> Self {
        Self {
            id: InteractionId::new(),
            command_name: command_name.into(),
            kind,
            payload: Value::Null,
            received_at: clock.utc(),
        }
    }

    /// Attaches the subtype-specific payload.
    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    /// Overrides the generated identifier.
    #[must_use]
    pub const fn with_id(mut self, id: InteractionId) -> Self {
        self.id = id;
        self
    }

    /// Returns the interaction identifier.
    #[must_use]
    pub const fn id(&self) -> InteractionId {
        self.id
    }

    /// Returns the command name as delivered by the source.
    #[must_use]
    pub fn command_name(&self) -> &str {
        &self.command_name
    }

    /// Returns the subtype discriminant.
    #[must_use]
    pub const fn kind(&self) -> InteractionKind {
        self.kind
    }

    /// Returns the subtype-specific payload.
    #[must_use]
    pub const fn payload(&self) -> &Value {
        &self.payload
    }

    /// Returns when the interaction was received.
    #[must_use]
    pub const fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}
