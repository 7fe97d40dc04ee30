//! Discovery port supplying raw command modules.

use crate::command::domain::CommandModule;
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Result type for command source operations.
pub type CommandSourceResult<T> = Result<T, CommandSourceError>;

/// Source of raw command modules, addressed by directory and entry name.
pub trait CommandSource: Send + Sync {
    /// Lists candidate entries in a directory (non-recursive).
    ///
    /// # Errors
    ///
    /// Returns [`CommandSourceError::DirectoryUnavailable`] when the directory
    /// cannot be enumerated.
    fn list_entries(&self, directory: &Utf8Path) -> CommandSourceResult<Vec<String>>;

    /// Loads one entry as a raw command module.
    ///
    /// # Errors
    ///
    /// Returns [`CommandSourceError`] when the entry cannot be read or does
    /// not decode into a module.
    fn load(&self, directory: &Utf8Path, entry: &str) -> CommandSourceResult<CommandModule>;
}

/// Errors returned by command source adapters.
#[derive(Debug, Clone, Error)]
pub enum CommandSourceError {
    /// The directory could not be enumerated.
    #[error("directory '{directory}' could not be read: {cause}")]
    DirectoryUnavailable {
        /// Directory path.
        directory: Utf8PathBuf,
        /// Underlying failure.
        cause: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// The entry could not be read.
    #[error("entry '{entry}' could not be read: {cause}")]
    EntryUnreadable {
        /// Entry name.
        entry: String,
        /// Underlying failure.
        cause: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// The entry content is not a valid command manifest.
    #[error("entry '{entry}' is not a valid command manifest: {reason}")]
    InvalidManifest {
        /// Entry name.
        entry: String,
        /// Decoding failure reason.
        reason: String,
    },

    /// The entry names a handler that is not available.
    #[error("entry '{entry}' references unknown handler '{handler}'")]
    UnknownHandler {
        /// Entry name.
        entry: String,
        /// Handler name.
        handler: String,
    },
}

impl CommandSourceError {
    /// Wraps a directory enumeration failure.
    pub fn directory_unavailable(
        directory: impl Into<Utf8PathBuf>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::DirectoryUnavailable {
            directory: directory.into(),
            cause: Arc::new(err),
        }
    }

    /// Wraps an entry read failure.
    pub fn entry_unreadable(
        entry: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::EntryUnreadable {
            entry: entry.into(),
            cause: Arc::new(err),
        }
    }
}
