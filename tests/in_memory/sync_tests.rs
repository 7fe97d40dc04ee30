//! In-memory integration tests for remote command registration.

use crate::in_memory::helpers::{
    APPLICATION_ID, CallLog, GROUP_ID, config, dispatcher, flat_module, log, runtime,
};
use rstest::rstest;
use switchyard::command::{
    adapters::memory::{InMemoryCommandRegistrar, InMemoryCommandSource},
    config::DispatcherConfig,
    domain::{ApplicationId, Credential, GroupId},
    ports::{RegistrarError, RegistrationScope},
    services::RefreshError,
};
use tokio::runtime::Runtime;

fn group_scope() -> RegistrationScope {
    RegistrationScope::Group(GroupId::new(GROUP_ID).expect("valid group id"))
}

fn remote_names(registrar: &InMemoryCommandRegistrar, scope: &RegistrationScope) -> Vec<String> {
    registrar
        .remote_commands(scope)
        .expect("registrar state")
        .unwrap_or_default()
        .iter()
        .filter_map(|command| command["name"].as_str().map(str::to_owned))
        .collect()
}

#[rstest]
fn refresh_replaces_remote_set(runtime: std::io::Result<Runtime>, log: CallLog) {
    let rt = runtime.expect("runtime");
    let source = InMemoryCommandSource::new();
    source
        .insert_module("commands", "ping", flat_module("ping", &log))
        .expect("insert module");
    let registrar = InMemoryCommandRegistrar::new();
    let subject = dispatcher(config(), &source, &registrar);

    rt.block_on(subject.refresh(false)).expect("first refresh");
    assert_eq!(remote_names(&registrar, &group_scope()), vec!["ping"]);

    source
        .insert_module("extra", "echo", flat_module("echo", &log))
        .expect("insert module");
    subject.load_directory("extra");
    rt.block_on(subject.refresh(false)).expect("second refresh");

    assert_eq!(remote_names(&registrar, &group_scope()), vec!["ping", "echo"]);
    assert!(
        registrar
            .remote_commands(&RegistrationScope::Global)
            .expect("registrar state")
            .is_none()
    );
}

#[rstest]
fn refreshing_twice_sends_identical_payloads(runtime: std::io::Result<Runtime>, log: CallLog) {
    let rt = runtime.expect("runtime");
    let source = InMemoryCommandSource::new();
    for name in ["ping", "echo"] {
        source
            .insert_module("commands", name, flat_module(name, &log))
            .expect("insert module");
    }
    let registrar = InMemoryCommandRegistrar::new();
    let subject = dispatcher(config(), &source, &registrar);

    let first = rt.block_on(subject.refresh(true)).expect("first refresh");
    let second = rt.block_on(subject.refresh(true)).expect("second refresh");

    assert_eq!(first, second);
    let requests = registrar.requests().expect("registrar state");
    assert_eq!(requests.len(), 2);
    assert_eq!(requests.first(), requests.last());
}

#[rstest]
fn empty_registry_clears_remote_scope(runtime: std::io::Result<Runtime>) {
    let rt = runtime.expect("runtime");
    let source = InMemoryCommandSource::new();
    source.insert_directory("commands").expect("insert directory");
    let registrar = InMemoryCommandRegistrar::new();
    let subject = dispatcher(config(), &source, &registrar);

    let report = rt.block_on(subject.refresh(true)).expect("refresh");

    assert!(report.synced());
    assert_eq!(report.command_count(), 0);
    assert_eq!(
        registrar
            .remote_commands(&RegistrationScope::Global)
            .expect("registrar state"),
        Some(Vec::new())
    );
}

#[rstest]
fn rejected_refresh_keeps_previous_remote_set(runtime: std::io::Result<Runtime>, log: CallLog) {
    let rt = runtime.expect("runtime");
    let source = InMemoryCommandSource::new();
    source
        .insert_module("commands", "ping", flat_module("ping", &log))
        .expect("insert module");
    let registrar = InMemoryCommandRegistrar::new();
    let subject = dispatcher(config(), &source, &registrar);
    rt.block_on(subject.refresh(true)).expect("initial refresh");

    registrar
        .set_failure(Some(RegistrarError::Rejected {
            status: 400,
            message: "invalid form body".to_owned(),
        }))
        .expect("registrar state");
    source
        .insert_module("extra", "echo", flat_module("echo", &log))
        .expect("insert module");
    subject.load_directory("extra");
    let report = rt.block_on(subject.refresh(true)).expect("refresh passes validation");

    assert!(!report.synced());
    assert_eq!(
        remote_names(&registrar, &RegistrationScope::Global),
        vec!["ping"]
    );
}

#[rstest]
fn group_refresh_without_group_is_rejected(runtime: std::io::Result<Runtime>) {
    let rt = runtime.expect("runtime");
    let source = InMemoryCommandSource::new();
    let registrar = InMemoryCommandRegistrar::new();
    let plain = DispatcherConfig::new(
        ApplicationId::new(APPLICATION_ID).expect("valid application id"),
        Credential::new("token"),
    );
    let subject = dispatcher(plain, &source, &registrar);

    let result = rt.block_on(subject.refresh(false));

    assert!(matches!(result, Err(RefreshError::MissingGroupId)));
    assert!(registrar.requests().expect("registrar state").is_empty());
}
