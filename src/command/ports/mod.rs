//! Port contracts for command discovery and remote registration.

mod registrar;
mod source;

pub use registrar::{
    CommandRegistrar, RegistrarError, RegistrarResult, RegistrationRequest, RegistrationScope,
};
pub use source::{CommandSource, CommandSourceError, CommandSourceResult};
