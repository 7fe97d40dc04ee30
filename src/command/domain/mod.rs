//! Domain model for command descriptors and inbound interactions.
//!
//! The command domain models command identity and metadata, the closed set
//! of interaction subtypes, handler contracts, and the two raw module shapes
//! produced by discovery. Infrastructure concerns remain outside this
//! boundary.

mod descriptor;
mod error;
mod handler;
mod ids;
mod interaction;
mod metadata;
mod module;

pub use descriptor::CommandDescriptor;
pub use error::{CommandDomainError, DispatchError};
pub use handler::{
    HandlerError, HandlerFn, HandlerResult, InteractionHandler, SharedHandler, handler_fn,
};
pub use ids::{ApplicationId, CommandName, Credential, GroupId, InteractionId};
pub use interaction::{Interaction, InteractionKind};
pub use metadata::{
    CommandMetadata, CommandOption, CommandOptionType, CommandType, OptionChoice,
};
pub use module::{CommandExports, CommandModule};
