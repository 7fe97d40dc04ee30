//! Shared world state for dispatch and registration BDD scenarios.

use std::sync::{Arc, Mutex};

use mockable::DefaultClock;
use rstest::fixture;
use switchyard::command::{
    adapters::memory::{InMemoryCommandRegistrar, InMemoryCommandSource},
    domain::{
        CommandExports, CommandMetadata, CommandModule, CommandName, SharedHandler, handler_fn,
    },
    services::{
        DispatchOutcome, InteractionDispatcher, MiddlewareError, RefreshError, RefreshReport,
    },
};

/// Application identifier used by every scenario.
pub const APPLICATION_ID: &str = "81234567890123456";

/// Dispatcher type used by the BDD world.
pub type TestDispatcher =
    InteractionDispatcher<InMemoryCommandSource, InMemoryCommandRegistrar, DefaultClock>;

/// Scenario world for dispatch behaviour tests.
pub struct DispatchWorld {
    /// Command modules available to discovery.
    pub source: InMemoryCommandSource,
    /// Remote registration service double.
    pub registrar: InMemoryCommandRegistrar,
    /// Dispatcher under test, created by a given step.
    pub dispatcher: Option<TestDispatcher>,
    /// Labels recorded by handlers, in call order.
    pub handler_log: Arc<Mutex<Vec<String>>>,
    /// Number of success events fired.
    pub successes: Arc<Mutex<usize>>,
    /// Messages of failure events fired, in order.
    pub failures: Arc<Mutex<Vec<String>>>,
    /// Result of the last `handle` call.
    pub last_outcome: Option<Result<DispatchOutcome, MiddlewareError>>,
    /// Result of the last refresh.
    pub last_refresh: Option<Result<RefreshReport, RefreshError>>,
}

impl DispatchWorld {
    /// Creates a world with empty adapters and no dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: InMemoryCommandSource::new(),
            registrar: InMemoryCommandRegistrar::new(),
            dispatcher: None,
            handler_log: Arc::new(Mutex::new(Vec::new())),
            successes: Arc::new(Mutex::new(0)),
            failures: Arc::new(Mutex::new(Vec::new())),
            last_outcome: None,
            last_refresh: None,
        }
    }

    /// Returns the dispatcher created by a given step.
    ///
    /// # Errors
    ///
    /// Returns an error when no dispatcher step has run.
    pub fn dispatcher(&self) -> Result<&TestDispatcher, eyre::Report> {
        self.dispatcher
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no dispatcher in scenario world"))
    }

    /// Handler that records `label` in the world's handler log.
    pub fn recording_handler(&self, label: String) -> SharedHandler {
        let handler_log = Arc::clone(&self.handler_log);
        handler_fn(move |_interaction| {
            let entry_log = Arc::clone(&handler_log);
            let entry = label.clone();
            async move {
                entry_log.lock().expect("handler log lock").push(entry);
                Ok(())
            }
        })
    }

    /// Builds a flat module for `name`, optionally with a button handler.
    ///
    /// # Errors
    ///
    /// Returns an error when `name` is not a valid command name.
    pub fn module(&self, name: &str, with_button: bool) -> Result<CommandModule, eyre::Report> {
        let metadata = CommandMetadata::new(CommandName::new(name)?, format!("{name} command"));
        let mut exports =
            CommandExports::new(metadata, self.recording_handler(format!("{name}:command")));
        if with_button {
            exports = exports.with_button(self.recording_handler(format!("{name}:button")));
        }
        Ok(CommandModule::flat(exports))
    }
}

impl Default for DispatchWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DispatchWorld {
    DispatchWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated step argument into trimmed items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}
