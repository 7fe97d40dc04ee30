//! Dispatcher configuration.

use camino::{Utf8Path, Utf8PathBuf};

use crate::command::domain::{ApplicationId, Credential, GroupId};

/// Configuration for an [`InteractionDispatcher`].
///
/// Immutable once handed to the dispatcher.
///
/// # Examples
///
/// ```
/// use switchyard::command::config::DispatcherConfig;
/// use switchyard::command::domain::{ApplicationId, Credential, GroupId};
///
/// let config = DispatcherConfig::new(
///     ApplicationId::new("81234567890123456").expect("valid id"),
///     Credential::new("token"),
/// )
/// .with_group_id(GroupId::new("91234567890123456").expect("valid id"))
/// .with_directories(["commands"])
/// .with_base_dir("/srv/bot");
///
/// assert_eq!(config.resolved_directories()[0].as_str(), "/srv/bot/commands");
/// assert!(!config.refresh_on_start());
/// ```
///
/// [`InteractionDispatcher`]: crate::command::services::InteractionDispatcher
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    application_id: ApplicationId,
    credential: Credential,
    group_id: Option<GroupId>,
    directories: Vec<Utf8PathBuf>,
    base_dir: Option<Utf8PathBuf>,
    refresh_on_start: bool,
}

impl DispatcherConfig {
    /// Creates a configuration with no directories, no group scope, and no
    /// startup refresh.
    #[must_use]
    pub const fn new(application_id: ApplicationId, credential: Credential) -> Self {
        Self {
            application_id,
            credential,
            group_id: None,
            directories: Vec::new(),
            base_dir: None,
            refresh_on_start: false,
        }
    }

    /// Scopes non-global refreshes to a group.
    #[must_use]
    pub fn with_group_id(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    /// Sets the directories loaded at construction, in load order.
    #[must_use]
    pub fn with_directories(
        mut self,
        directories: impl IntoIterator<Item = impl Into<Utf8PathBuf>>,
    ) -> Self {
        self.directories = directories.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the base directory that relative discovery paths resolve against.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<Utf8PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Requests a command refresh when the dispatcher starts.
    #[must_use]
    pub const fn with_refresh_on_start(mut self, refresh_on_start: bool) -> Self {
        self.refresh_on_start = refresh_on_start;
        self
    }

    /// Returns the application identifier.
    #[must_use]
    pub const fn application_id(&self) -> &ApplicationId {
        &self.application_id
    }

    /// Returns the registration credential.
    #[must_use]
    pub const fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Returns the configured group scope.
    #[must_use]
    pub const fn group_id(&self) -> Option<&GroupId> {
        self.group_id.as_ref()
    }

    /// Returns the configured directories as given.
    #[must_use]
    pub fn directories(&self) -> &[Utf8PathBuf] {
        &self.directories
    }

    /// Returns whether a refresh runs on start.
    #[must_use]
    pub const fn refresh_on_start(&self) -> bool {
        self.refresh_on_start
    }

    /// Resolves a discovery path against the base directory.
    ///
    /// Absolute paths, and every path when no base directory is set, are
    /// returned unchanged.
    #[must_use]
    pub fn resolve_directory(&self, directory: &Utf8Path) -> Utf8PathBuf {
        match &self.base_dir {
            Some(base) if directory.is_relative() => base.join(directory),
            _ => directory.to_path_buf(),
        }
    }

    /// Returns the configured directories resolved against the base
    /// directory.
    #[must_use]
    pub fn resolved_directories(&self) -> Vec<Utf8PathBuf> {
        self.directories
            .iter()
            .map(|directory| self.resolve_directory(directory))
            .collect()
    }
}
