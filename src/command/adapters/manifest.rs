//! Filesystem command source reading JSON command manifests.
//!
//! Each `*.json` file in a directory describes one command. Handler code is
//! never loaded from disk: manifests name handlers, and the names resolve
//! against a [`HandlerTable`] compiled into the host binary.

use crate::command::{
    domain::{CommandExports, CommandMetadata, CommandModule, SharedHandler},
    ports::{CommandSource, CommandSourceError, CommandSourceResult},
};
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

const MANIFEST_EXTENSION: &str = ".json";

/// Named handlers available to manifests.
#[derive(Clone, Default)]
pub struct HandlerTable {
    handlers: HashMap<String, SharedHandler>,
}

impl HandlerTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handler under `name`, replacing any previous entry.
    #[must_use]
    pub fn with_handler(mut self, name: impl Into<String>, handler: SharedHandler) -> Self {
        self.handlers.insert(name.into(), handler);
        self
    }

    /// Returns the handler registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SharedHandler> {
        self.handlers.get(name)
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` when no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerTable {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort();
        formatter
            .debug_struct("HandlerTable")
            .field("handlers", &names)
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
struct ManifestExports {
    data: Option<CommandMetadata>,
    command: Option<String>,
    autocomplete: Option<String>,
    button: Option<String>,
    context_menu: Option<String>,
    message_context_menu: Option<String>,
    user_context_menu: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ManifestDocument {
    default: Option<ManifestExports>,
    #[serde(flatten)]
    exports: ManifestExports,
}

/// Command source backed by manifest files on disk.
#[derive(Debug, Clone)]
pub struct ManifestCommandSource {
    handlers: HandlerTable,
}

impl ManifestCommandSource {
    /// Creates a source resolving handler names against `handlers`.
    #[must_use]
    pub const fn new(handlers: HandlerTable) -> Self {
        Self { handlers }
    }

    fn resolve(
        &self,
        entry: &str,
        exports: ManifestExports,
    ) -> CommandSourceResult<CommandExports> {
        let lookup = |name: Option<String>| -> CommandSourceResult<Option<SharedHandler>> {
            name.map(|handler| {
                self.handlers.get(&handler).cloned().ok_or_else(|| {
                    CommandSourceError::UnknownHandler {
                        entry: entry.to_owned(),
                        handler,
                    }
                })
            })
            .transpose()
        };

        Ok(CommandExports {
            data: exports.data,
            command: lookup(exports.command)?,
            autocomplete: lookup(exports.autocomplete)?,
            button: lookup(exports.button)?,
            context_menu: lookup(exports.context_menu)?,
            message_context_menu: lookup(exports.message_context_menu)?,
            user_context_menu: lookup(exports.user_context_menu)?,
        })
    }
}

fn open_directory(directory: &Utf8Path) -> CommandSourceResult<Dir> {
    Dir::open_ambient_dir(directory, ambient_authority())
        .map_err(|err| CommandSourceError::directory_unavailable(directory, err))
}

impl CommandSource for ManifestCommandSource {
    fn list_entries(&self, directory: &Utf8Path) -> CommandSourceResult<Vec<String>> {
        let dir = open_directory(directory)?;
        let read_dir = dir
            .entries()
            .map_err(|err| CommandSourceError::directory_unavailable(directory, err))?;

        let mut names = Vec::new();
        for dir_entry in read_dir {
            let candidate =
                dir_entry.map_err(|err| CommandSourceError::directory_unavailable(directory, err))?;
            let is_file = candidate
                .file_type()
                .map_err(|err| CommandSourceError::directory_unavailable(directory, err))?
                .is_file();
            let name = candidate
                .file_name()
                .map_err(|err| CommandSourceError::directory_unavailable(directory, err))?;
            if is_file && name.ends_with(MANIFEST_EXTENSION) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn load(&self, directory: &Utf8Path, entry: &str) -> CommandSourceResult<CommandModule> {
        let dir = open_directory(directory)?;
        let contents = dir
            .read_to_string(entry)
            .map_err(|err| CommandSourceError::entry_unreadable(entry, err))?;
        let document: ManifestDocument =
            serde_json::from_str(&contents).map_err(|err| CommandSourceError::InvalidManifest {
                entry: entry.to_owned(),
                reason: err.to_string(),
            })?;

        let default = document
            .default
            .map(|exports| self.resolve(entry, exports))
            .transpose()?;
        let exports = self.resolve(entry, document.exports)?;
        Ok(CommandModule { default, exports })
    }
}
