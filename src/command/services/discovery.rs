//! Directory scanning that turns raw modules into descriptors.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::registry::CommandRegistry;
use crate::command::{
    domain::{CommandDescriptor, CommandName},
    ports::{CommandSource, CommandSourceError},
};

/// Tracing target for discovery operations.
pub(crate) const DISCOVERY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::discovery");

/// A local discovery failure. Always logged and skipped; never escalated.
#[derive(Debug, Clone, Error)]
pub enum DiscoveryError {
    /// The directory could not be enumerated.
    #[error("something went wrong when trying to load directory '{directory}': {cause}")]
    Directory {
        /// Directory path.
        directory: Utf8PathBuf,
        /// Source failure.
        cause: CommandSourceError,
    },

    /// An entry could not be read or decoded.
    #[error("something went wrong when trying to parse '{entry}': {cause}")]
    Entry {
        /// Entry name.
        entry: String,
        /// Source failure.
        cause: CommandSourceError,
    },

    /// The entry carried neither a nested nor a flat complete descriptor.
    #[error("found '{entry}' but couldn't parse it due to an invalid format")]
    InvalidFormat {
        /// Entry name.
        entry: String,
    },
}

/// Outcome of loading one directory.
#[derive(Debug, Clone)]
pub struct LoadReport {
    directory: Utf8PathBuf,
    loaded: Vec<CommandName>,
    failures: Vec<DiscoveryError>,
}

impl LoadReport {
    /// Returns the loaded directory.
    #[must_use]
    pub fn directory(&self) -> &Utf8Path {
        &self.directory
    }

    /// Returns the names inserted or overwritten, in load order.
    #[must_use]
    pub fn loaded(&self) -> &[CommandName] {
        &self.loaded
    }

    /// Returns the failures that were logged and skipped.
    #[must_use]
    pub fn failures(&self) -> &[DiscoveryError] {
        &self.failures
    }

    /// Returns `true` when the directory itself could not be enumerated.
    #[must_use]
    pub fn directory_failed(&self) -> bool {
        self.failures
            .iter()
            .any(|failure| matches!(failure, DiscoveryError::Directory { .. }))
    }
}

/// Descriptors read from one directory, before registry insertion.
pub(crate) struct DirectoryScan {
    directory: Utf8PathBuf,
    descriptors: Vec<(String, CommandDescriptor)>,
    failures: Vec<DiscoveryError>,
}

/// Reads every candidate entry of `directory` without touching a registry.
pub(crate) fn scan_directory<S>(source: &S, directory: &Utf8Path) -> DirectoryScan
where
    S: CommandSource + ?Sized,
{
    info!(target: DISCOVERY_TARGET, %directory, "loading directory");
    let mut scan = DirectoryScan {
        directory: directory.to_path_buf(),
        descriptors: Vec::new(),
        failures: Vec::new(),
    };

    let entries = match source.list_entries(directory) {
        Ok(entries) => entries,
        Err(cause) => {
            scan.failures.push(DiscoveryError::Directory {
                directory: directory.to_path_buf(),
                cause,
            });
            return scan;
        }
    };

    for entry in entries {
        match source.load(directory, &entry) {
            Ok(module) => match module.into_descriptor() {
                Some(descriptor) => scan.descriptors.push((entry, descriptor)),
                None => scan.failures.push(DiscoveryError::InvalidFormat { entry }),
            },
            Err(cause) => scan.failures.push(DiscoveryError::Entry { entry, cause }),
        }
    }
    scan
}

/// Inserts scanned descriptors into `registry`, later entries overwriting
/// earlier ones, and logs the skipped failures.
pub(crate) fn apply_scan(registry: &mut CommandRegistry, scan: DirectoryScan) -> LoadReport {
    let DirectoryScan {
        directory,
        descriptors,
        failures,
    } = scan;

    let mut loaded = Vec::with_capacity(descriptors.len());
    for (entry, descriptor) in descriptors {
        let name = descriptor.name().clone();
        if registry.insert(descriptor).is_some() {
            info!(target: DISCOVERY_TARGET, command = %name, %entry, "replaced previously loaded command");
        } else {
            info!(target: DISCOVERY_TARGET, command = %name, %entry, "found and loaded command");
        }
        loaded.push(name);
    }

    for failure in &failures {
        warn!(target: DISCOVERY_TARGET, %directory, error = %failure, "skipping command source");
    }

    LoadReport {
        directory,
        loaded,
        failures,
    }
}

/// Loads every candidate entry of `directory` into `registry`.
///
/// Failures are logged and collected in the report; the scan always runs to
/// completion.
#[cfg(test)]
pub(crate) fn load_directory<S>(
    source: &S,
    registry: &mut CommandRegistry,
    directory: &Utf8Path,
) -> LoadReport
where
    S: CommandSource + ?Sized,
{
    apply_scan(registry, scan_directory(source, directory))
}
