//! Interaction dispatcher: middleware, classification, lookup, invocation.

use camino::{Utf8Path, Utf8PathBuf};
use mockable::Clock;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, warn};

use super::discovery::{LoadReport, apply_scan, scan_directory};
use super::events::{EventBus, EventChannel, Listener};
use super::middleware::{MiddlewareChain, MiddlewareError, MiddlewareFlow, SharedMiddleware};
use super::registry::CommandRegistry;
use super::synchronizer::{RefreshError, RefreshReport, payload_digest};
use crate::command::{
    config::DispatcherConfig,
    domain::{CommandName, DispatchError, Interaction, InteractionKind},
    ports::{CommandRegistrar, CommandSource, RegistrationRequest, RegistrationScope},
};

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Path an interaction took through the dispatcher.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// An interceptor stopped the chain; nothing else ran.
    Stopped,
    /// The subtype is not routable; nothing else ran.
    Ignored,
    /// The handler completed and the success event fired.
    Handled,
    /// The descriptor has no handler for the subtype. Logged only; the
    /// success event fired.
    MissingHandler,
    /// Lookup or the handler failed and the failure event fired.
    Failed(DispatchError),
}

/// Routes interactions to registered command handlers and keeps the remote
/// registration in sync with the registry.
pub struct InteractionDispatcher<S, R, C>
where
    S: CommandSource,
    R: CommandRegistrar,
    C: Clock + Send + Sync,
{
    config: DispatcherConfig,
    directories: RwLock<Vec<Utf8PathBuf>>,
    registry: RwLock<CommandRegistry>,
    middleware: RwLock<MiddlewareChain>,
    events: EventBus,
    source: Arc<S>,
    registrar: Arc<R>,
    clock: Arc<C>,
}

impl<S, R, C> InteractionDispatcher<S, R, C>
where
    S: CommandSource,
    R: CommandRegistrar,
    C: Clock + Send + Sync,
{
    /// Creates a dispatcher and loads every configured directory in order.
    ///
    /// Discovery failures are logged and skipped; construction never fails.
    #[must_use]
    pub fn new(config: DispatcherConfig, source: Arc<S>, registrar: Arc<R>, clock: Arc<C>) -> Self {
        let directories = config.directories().to_vec();
        let dispatcher = Self {
            config,
            directories: RwLock::new(Vec::new()),
            registry: RwLock::new(CommandRegistry::new()),
            middleware: RwLock::new(MiddlewareChain::new()),
            events: EventBus::new(),
            source,
            registrar,
            clock,
        };
        dispatcher.load_directories(&directories);
        dispatcher
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Subscribes a listener to an outcome channel.
    pub fn on(&self, channel: EventChannel, listener: Listener) -> &Self {
        self.events.on(channel, listener);
        self
    }

    /// Removes every registration of `listener` from an outcome channel.
    pub fn off(&self, channel: EventChannel, listener: &Listener) -> &Self {
        self.events.off(channel, listener);
        self
    }

    /// Appends an interceptor to the middleware chain.
    pub fn use_middleware(&self, middleware: SharedMiddleware) -> &Self {
        self.middleware
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(middleware);
        self
    }

    /// Returns the remembered discovery directories, in load order.
    #[must_use]
    pub fn directories(&self) -> Vec<Utf8PathBuf> {
        self.directories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns registered command names in first-insertion order.
    #[must_use]
    pub fn command_names(&self) -> Vec<CommandName> {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .names()
            .cloned()
            .collect()
    }

    /// Returns a snapshot of the registry.
    #[must_use]
    pub fn registry(&self) -> CommandRegistry {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Loads one directory into the registry without remembering it.
    ///
    /// A relative `directory` is resolved against the configured base
    /// directory, as configured directories are. The source is read before
    /// the registry write lock is taken.
    pub fn load_directory(&self, directory: impl AsRef<Utf8Path>) -> LoadReport {
        let resolved = self.config.resolve_directory(directory.as_ref());
        self.load_resolved(&resolved)
    }

    fn load_resolved(&self, directory: &Utf8Path) -> LoadReport {
        let scan = scan_directory(&*self.source, directory);
        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        apply_scan(&mut registry, scan)
    }

    /// Appends `extra` to the remembered directories, then loads every
    /// remembered directory in order.
    pub fn load_directories(&self, extra: &[Utf8PathBuf]) -> Vec<LoadReport> {
        let to_load = {
            let mut directories = self
                .directories
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            directories.extend(
                extra
                    .iter()
                    .map(|directory| self.config.resolve_directory(directory)),
            );
            directories.clone()
        };
        to_load
            .iter()
            .map(|directory| self.load_resolved(directory))
            .collect()
    }

    /// Runs the middleware chain and, unless stopped, dispatches the
    /// interaction to its handler.
    ///
    /// Lookup and handler failures are reported on the failure channel and
    /// in the returned outcome; they are not returned as errors.
    ///
    /// # Errors
    ///
    /// Returns [`MiddlewareError`] when an interceptor fails. No event fires
    /// in that case.
    pub async fn handle(&self, interaction: &Interaction) -> Result<DispatchOutcome, MiddlewareError> {
        let chain = self
            .middleware
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if chain.run(interaction).await? == MiddlewareFlow::Stop {
            debug!(target: DISPATCH_TARGET, interaction = %interaction.id(), "middleware stopped interaction");
            return Ok(DispatchOutcome::Stopped);
        }

        let kind = interaction.kind();
        if !kind.is_routable() {
            debug!(target: DISPATCH_TARGET, interaction = %interaction.id(), "ignoring unroutable interaction");
            return Ok(DispatchOutcome::Ignored);
        }

        let outcome = match self.invoke(interaction, kind).await {
            Ok(outcome) => {
                self.events.fire(EventChannel::Success, interaction, None);
                outcome
            }
            Err(dispatch_error) => {
                warn!(
                    target: DISPATCH_TARGET,
                    interaction = %interaction.id(),
                    command = interaction.command_name(),
                    error = %dispatch_error,
                    "interaction failed"
                );
                self.events
                    .fire(EventChannel::Failure, interaction, Some(&dispatch_error));
                DispatchOutcome::Failed(dispatch_error)
            }
        };

        let elapsed = self.clock.utc() - interaction.received_at();
        debug!(
            target: DISPATCH_TARGET,
            interaction = %interaction.id(),
            %kind,
            elapsed_ms = elapsed.num_milliseconds(),
            "interaction processed"
        );
        Ok(outcome)
    }

    async fn invoke(
        &self,
        interaction: &Interaction,
        kind: InteractionKind,
    ) -> Result<DispatchOutcome, DispatchError> {
        let (command, handler) = {
            let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
            let descriptor = registry
                .get(interaction.command_name())
                .ok_or_else(|| DispatchError::CommandNotFound(interaction.command_name().to_owned()))?;
            (descriptor.name().clone(), descriptor.handler_for(kind).cloned())
        };

        let Some(subtype_handler) = handler else {
            error!(
                target: DISPATCH_TARGET,
                %command,
                %kind,
                "couldn't find a handler for this interaction type under the command"
            );
            return Ok(DispatchOutcome::MissingHandler);
        };

        subtype_handler
            .handle(interaction)
            .await
            .map_err(|source| DispatchError::Handler {
                command,
                kind,
                source,
            })?;
        Ok(DispatchOutcome::Handled)
    }

    /// Replaces remote command metadata with the registry contents.
    ///
    /// A non-global refresh targets the configured group. Remote failures are
    /// logged and reported through [`RefreshReport::synced`].
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError::MissingGroupId`] for a non-global refresh
    /// without a configured group, before any remote call.
    pub async fn refresh(&self, global: bool) -> Result<RefreshReport, RefreshError> {
        let scope = if global {
            RegistrationScope::Global
        } else {
            let Some(group_id) = self.config.group_id() else {
                error!(target: DISPATCH_TARGET, "cannot refresh group commands without a group id");
                return Err(RefreshError::MissingGroupId);
            };
            RegistrationScope::Group(group_id.clone())
        };

        let commands = self
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .serialize_metadata()
            .map_err(|err| RefreshError::Serialization(Arc::new(err)))?;
        let digest = payload_digest(&commands)?;
        let command_count = commands.len();

        info!(target: DISPATCH_TARGET, %scope, command_count, "refreshing commands");
        let request = RegistrationRequest {
            application_id: self.config.application_id().clone(),
            credential: self.config.credential().clone(),
            scope: scope.clone(),
            commands,
        };

        let synced = match self.registrar.bulk_overwrite(&request).await {
            Ok(()) => {
                info!(target: DISPATCH_TARGET, %scope, "successfully refreshed commands");
                true
            }
            Err(registrar_error) => {
                error!(target: DISPATCH_TARGET, %scope, error = %registrar_error, "command refresh failed");
                false
            }
        };

        Ok(RefreshReport::new(scope, command_count, digest, synced))
    }

    /// Performs the startup refresh when configured.
    ///
    /// The refresh is group-scoped when a group id is configured and global
    /// otherwise. Returns `None` when no startup refresh is configured.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError`] when the refresh is rejected locally.
    pub async fn start(&self) -> Result<Option<RefreshReport>, RefreshError> {
        if !self.config.refresh_on_start() {
            return Ok(None);
        }
        let global = self.config.group_id().is_none();
        self.refresh(global).await.map(Some)
    }
}

impl<S, R, C> InteractionDispatcher<S, R, C>
where
    S: CommandSource + 'static,
    R: CommandRegistrar + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Processes interactions from `receiver` until the channel closes.
    ///
    /// Each interaction runs on its own task. Finished tasks are reaped while
    /// the channel is open, so a panicking handler is logged as soon as its
    /// task ends; the method returns once every spawned task has finished.
    /// Middleware failures are logged.
    pub async fn serve(self: Arc<Self>, mut receiver: mpsc::Receiver<Interaction>) {
        let mut tasks = JoinSet::new();
        loop {
            tokio::select! {
                received = receiver.recv() => match received {
                    Some(interaction) => {
                        tasks.spawn(Arc::clone(&self).serve_one(interaction));
                    }
                    None => break,
                },
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => reap(joined),
            }
        }

        while let Some(joined) = tasks.join_next().await {
            reap(joined);
        }
    }

    async fn serve_one(self: Arc<Self>, interaction: Interaction) {
        if let Err(middleware_error) = self.handle(&interaction).await {
            warn!(
                target: DISPATCH_TARGET,
                interaction = %interaction.id(),
                error = %middleware_error,
                "middleware aborted interaction"
            );
        }
    }
}

fn reap(joined: Result<(), JoinError>) {
    if let Err(join_error) = joined {
        error!(target: DISPATCH_TARGET, error = %join_error, "interaction task panicked");
    }
}
