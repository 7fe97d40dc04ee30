//! Shared test helpers for in-memory dispatcher integration tests.

use std::io;
use std::sync::{Arc, Mutex};

use mockable::DefaultClock;
use rstest::fixture;
use switchyard::command::{
    adapters::memory::{InMemoryCommandRegistrar, InMemoryCommandSource},
    config::DispatcherConfig,
    domain::{
        ApplicationId, CommandExports, CommandMetadata, CommandModule, CommandName, Credential,
        GroupId, SharedHandler, handler_fn,
    },
    services::InteractionDispatcher,
};
use tokio::runtime::Runtime;

/// Application identifier used across tests.
pub const APPLICATION_ID: &str = "81234567890123456";

/// Group identifier used across tests.
pub const GROUP_ID: &str = "91234567890123456";

/// Dispatcher wired to in-memory adapters.
pub type MemoryDispatcher =
    InteractionDispatcher<InMemoryCommandSource, InMemoryCommandRegistrar, DefaultClock>;

/// Ordered record of handler activity.
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides an empty call log.
#[fixture]
pub fn log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Returns a copy of the recorded calls.
pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().expect("call log lock").clone()
}

/// Creates chat-input metadata for `name`.
pub fn metadata(name: &str) -> CommandMetadata {
    CommandMetadata::new(
        CommandName::new(name).expect("valid command name"),
        format!("{name} command"),
    )
}

/// Handler that records `label` and succeeds.
pub fn recording_handler(log: &CallLog, label: &str) -> SharedHandler {
    let handler_log = Arc::clone(log);
    let handler_label = label.to_owned();
    handler_fn(move |_interaction| {
        let entry_log = Arc::clone(&handler_log);
        let entry = handler_label.clone();
        async move {
            entry_log.lock().expect("call log lock").push(entry);
            Ok(())
        }
    })
}

/// Flat module with a recording primary handler.
pub fn flat_module(name: &str, log: &CallLog) -> CommandModule {
    CommandModule::flat(CommandExports::new(
        metadata(name),
        recording_handler(log, name),
    ))
}

/// Configuration loading the `commands` directory, scoped to the test group.
pub fn config() -> DispatcherConfig {
    DispatcherConfig::new(
        ApplicationId::new(APPLICATION_ID).expect("valid application id"),
        Credential::new("token"),
    )
    .with_group_id(GroupId::new(GROUP_ID).expect("valid group id"))
    .with_directories(["commands"])
}

/// Builds a dispatcher from the given adapters.
pub fn dispatcher(
    config: DispatcherConfig,
    source: &InMemoryCommandSource,
    registrar: &InMemoryCommandRegistrar,
) -> MemoryDispatcher {
    InteractionDispatcher::new(
        config,
        Arc::new(source.clone()),
        Arc::new(registrar.clone()),
        Arc::new(DefaultClock),
    )
}
