//! In-memory command source for compiled-in registration and tests.

use crate::command::{
    domain::CommandModule,
    ports::{CommandSource, CommandSourceError, CommandSourceResult},
};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory command source.
///
/// Each directory holds named modules in insertion order. Inserting an
/// existing entry name replaces the module in place.
#[derive(Clone, Default)]
pub struct InMemoryCommandSource {
    state: Arc<RwLock<HashMap<Utf8PathBuf, Vec<(String, CommandModule)>>>>,
}

impl InMemoryCommandSource {
    /// Creates an empty source with no directories.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a module to a directory, creating the directory when needed.
    ///
    /// # Errors
    ///
    /// Returns [`CommandSourceError::DirectoryUnavailable`] when lock
    /// acquisition fails.
    pub fn insert_module(
        &self,
        directory: impl Into<Utf8PathBuf>,
        entry: impl Into<String>,
        module: CommandModule,
    ) -> CommandSourceResult<()> {
        let directory_path = directory.into();
        let entry_name = entry.into();
        let mut state = self.state.write().map_err(|err| {
            CommandSourceError::directory_unavailable(
                directory_path.clone(),
                io::Error::other(err.to_string()),
            )
        })?;

        let entries = state.entry(directory_path).or_default();
        match entries.iter_mut().find(|(name, _)| *name == entry_name) {
            Some(existing) => existing.1 = module,
            None => entries.push((entry_name, module)),
        }
        Ok(())
    }

    /// Creates an empty directory.
    ///
    /// # Errors
    ///
    /// Returns [`CommandSourceError::DirectoryUnavailable`] when lock
    /// acquisition fails.
    pub fn insert_directory(&self, directory: impl Into<Utf8PathBuf>) -> CommandSourceResult<()> {
        let directory_path = directory.into();
        let mut state = self.state.write().map_err(|err| {
            CommandSourceError::directory_unavailable(
                directory_path.clone(),
                io::Error::other(err.to_string()),
            )
        })?;
        state.entry(directory_path).or_default();
        Ok(())
    }
}

impl CommandSource for InMemoryCommandSource {
    fn list_entries(&self, directory: &Utf8Path) -> CommandSourceResult<Vec<String>> {
        let state = self.state.read().map_err(|err| {
            CommandSourceError::directory_unavailable(directory, io::Error::other(err.to_string()))
        })?;

        state
            .get(directory)
            .map(|entries| entries.iter().map(|(name, _)| name.clone()).collect())
            .ok_or_else(|| {
                CommandSourceError::directory_unavailable(
                    directory,
                    io::Error::new(io::ErrorKind::NotFound, "no such directory"),
                )
            })
    }

    fn load(&self, directory: &Utf8Path, entry: &str) -> CommandSourceResult<CommandModule> {
        let state = self.state.read().map_err(|err| {
            CommandSourceError::entry_unreadable(entry, io::Error::other(err.to_string()))
        })?;

        state
            .get(directory)
            .and_then(|entries| entries.iter().find(|(name, _)| name == entry))
            .map(|(_, module)| module.clone())
            .ok_or_else(|| {
                CommandSourceError::entry_unreadable(
                    entry,
                    io::Error::new(io::ErrorKind::NotFound, "no such entry"),
                )
            })
    }
}
