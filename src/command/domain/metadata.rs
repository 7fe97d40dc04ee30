//! Command metadata in the shape expected by the registration service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{CommandDomainError, CommandName};

/// Kind of application command as seen by the registration service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandType {
    /// Slash command typed into the chat input.
    #[default]
    ChatInput,
    /// Context-menu action on a user.
    User,
    /// Context-menu action on a message.
    Message,
}

/// Value type accepted by a command option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandOptionType {
    /// Free-form string value.
    String,
    /// Integer value.
    Integer,
    /// Boolean value.
    Boolean,
    /// Reference to a user.
    User,
    /// Reference to a channel.
    Channel,
    /// Reference to a role.
    Role,
    /// Reference to a user or role.
    Mentionable,
    /// Floating-point value.
    Number,
    /// Uploaded file.
    Attachment,
}

/// A predefined choice for a command option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChoice {
    /// Display name of the choice.
    pub name: String,
    /// Value delivered when the choice is picked.
    pub value: Value,
}

/// Option (parameter) declared by a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOption {
    /// Option name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Value type.
    #[serde(rename = "type")]
    pub option_type: CommandOptionType,
    /// Whether the option must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Allowed choices.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<OptionChoice>,
    /// Whether values are suggested through autocomplete interactions.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub autocomplete: bool,
}

impl CommandOption {
    /// Creates an optional command option.
    ///
    /// # Errors
    ///
    /// Returns [`CommandDomainError::InvalidOptionName`] when the name does
    /// not satisfy the same rules as command names.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        option_type: CommandOptionType,
    ) -> Result<Self, CommandDomainError> {
        let raw_name = name.into();
        let validated = CommandName::new(raw_name.as_str())
            .map_err(|_| CommandDomainError::InvalidOptionName(raw_name))?;
        Ok(Self {
            name: validated.into(),
            description: description.into(),
            option_type,
            required: false,
            choices: Vec::new(),
            autocomplete: false,
        })
    }

    /// Marks the option as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Adds a predefined choice.
    #[must_use]
    pub fn with_choice(mut self, name: impl Into<String>, value: Value) -> Self {
        self.choices.push(OptionChoice {
            name: name.into(),
            value,
        });
        self
    }

    /// Enables autocomplete suggestions for the option.
    #[must_use]
    pub const fn with_autocomplete(mut self) -> Self {
        self.autocomplete = true;
        self
    }
}

/// Metadata describing a command to the registration service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// Unique command name.
    pub name: CommandName,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Command kind.
    #[serde(rename = "type", default)]
    pub command_type: CommandType,
    /// Declared options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
    /// Permission bit set required by default, as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_member_permissions: Option<String>,
    /// Whether the command is available in direct messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dm_permission: Option<bool>,
}

impl CommandMetadata {
    /// Creates chat-input command metadata.
    #[must_use]
    pub fn new(name: CommandName, description: impl Into<String>) -> Self {
        Self {
            name,
            description: description.into(),
            command_type: CommandType::ChatInput,
            options: Vec::new(),
            default_member_permissions: None,
            dm_permission: None,
        }
    }

    /// Sets the command kind.
    #[must_use]
    pub const fn with_type(mut self, command_type: CommandType) -> Self {
        self.command_type = command_type;
        self
    }

    /// Adds an option.
    #[must_use]
    pub fn with_option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    /// Sets the default member permission bit set.
    #[must_use]
    pub fn with_default_member_permissions(mut self, permissions: impl Into<String>) -> Self {
        self.default_member_permissions = Some(permissions.into());
        self
    }

    /// Sets whether the command is usable in direct messages.
    #[must_use]
    pub const fn with_dm_permission(mut self, allowed: bool) -> Self {
        self.dm_permission = Some(allowed);
        self
    }

    /// Serializes the metadata into its wire representation.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if serialization fails.
    pub fn to_wire(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
