//! Then steps for dispatch BDD scenarios.

use super::world::{DispatchWorld, split_list};
use eyre::eyre;
use rstest_bdd_macros::then;
use switchyard::command::{
    domain::GroupId,
    ports::RegistrationScope,
    services::{DispatchOutcome, RefreshError, RefreshReport},
};

fn last_outcome(world: &DispatchWorld) -> Result<&DispatchOutcome, eyre::Report> {
    match &world.last_outcome {
        Some(Ok(outcome)) => Ok(outcome),
        Some(Err(err)) => Err(eyre!("middleware failed: {err}")),
        None => Err(eyre!("no interaction handled in scenario world")),
    }
}

fn last_report(world: &DispatchWorld) -> Result<&RefreshReport, eyre::Report> {
    match &world.last_refresh {
        Some(Ok(report)) => Ok(report),
        Some(Err(err)) => Err(eyre!("refresh rejected: {err}")),
        None => Err(eyre!("no refresh ran in scenario world")),
    }
}

fn handler_log(world: &DispatchWorld) -> Result<Vec<String>, eyre::Report> {
    world
        .handler_log
        .lock()
        .map(|entries| entries.clone())
        .map_err(|err| eyre!("handler log poisoned: {err}"))
}

fn remote_names(
    world: &DispatchWorld,
    scope: &RegistrationScope,
) -> Result<Vec<String>, eyre::Report> {
    let commands = world
        .registrar
        .remote_commands(scope)
        .map_err(|err| eyre!("registrar state: {err}"))?
        .ok_or_else(|| eyre!("no remote commands for scope {scope}"))?;
    Ok(commands
        .iter()
        .filter_map(|command| command["name"].as_str().map(str::to_owned))
        .collect())
}

#[then(r#"the handler log is "{entries}""#)]
fn handler_log_is(world: &DispatchWorld, entries: String) -> Result<(), eyre::Report> {
    let expected = split_list(&entries);
    let actual = handler_log(world)?;
    if actual != expected {
        return Err(eyre!("expected handler log {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("the handler log is empty")]
fn handler_log_is_empty(world: &DispatchWorld) -> Result<(), eyre::Report> {
    let actual = handler_log(world)?;
    if !actual.is_empty() {
        return Err(eyre!("expected no handler calls, found {actual:?}"));
    }
    Ok(())
}

#[then("the success event fired {count:usize} times")]
fn success_event_count(world: &DispatchWorld, count: usize) -> Result<(), eyre::Report> {
    let fired = *world
        .successes
        .lock()
        .map_err(|err| eyre!("success counter poisoned: {err}"))?;
    if fired != count {
        return Err(eyre!("expected {count} success events, found {fired}"));
    }
    Ok(())
}

#[then("the failure event fired {count:usize} times")]
fn failure_event_count(world: &DispatchWorld, count: usize) -> Result<(), eyre::Report> {
    let fired = world
        .failures
        .lock()
        .map_err(|err| eyre!("failure log poisoned: {err}"))?
        .len();
    if fired != count {
        return Err(eyre!("expected {count} failure events, found {fired}"));
    }
    Ok(())
}

#[then(r#"the last failure message is "{message}""#)]
fn last_failure_message(world: &DispatchWorld, message: String) -> Result<(), eyre::Report> {
    let failures = world
        .failures
        .lock()
        .map_err(|err| eyre!("failure log poisoned: {err}"))?;
    match failures.last() {
        Some(last) if *last == message => Ok(()),
        other => Err(eyre!("expected failure '{message}', found {other:?}")),
    }
}

#[then("the interaction was stopped")]
fn interaction_stopped(world: &DispatchWorld) -> Result<(), eyre::Report> {
    match last_outcome(world)? {
        DispatchOutcome::Stopped => Ok(()),
        other => Err(eyre!("expected a stopped interaction, found {other:?}")),
    }
}

#[then("the interaction was ignored")]
fn interaction_ignored(world: &DispatchWorld) -> Result<(), eyre::Report> {
    match last_outcome(world)? {
        DispatchOutcome::Ignored => Ok(()),
        other => Err(eyre!("expected an ignored interaction, found {other:?}")),
    }
}

#[then("the missing handler was reported")]
fn missing_handler_reported(world: &DispatchWorld) -> Result<(), eyre::Report> {
    match last_outcome(world)? {
        DispatchOutcome::MissingHandler => Ok(()),
        other => Err(eyre!("expected a missing handler outcome, found {other:?}")),
    }
}

#[then("the dispatcher has {count:usize} commands")]
fn dispatcher_command_count(world: &DispatchWorld, count: usize) -> Result<(), eyre::Report> {
    let found = world.dispatcher()?.command_names().len();
    if found != count {
        return Err(eyre!("expected {count} commands, found {found}"));
    }
    Ok(())
}

#[then(r#"the remembered directories are "{directories}""#)]
fn remembered_directories(world: &DispatchWorld, directories: String) -> Result<(), eyre::Report> {
    let expected = split_list(&directories);
    let actual: Vec<String> = world
        .dispatcher()?
        .directories()
        .into_iter()
        .map(String::from)
        .collect();
    if actual != expected {
        return Err(eyre!("expected directories {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("the refresh was synced")]
fn refresh_synced(world: &DispatchWorld) -> Result<(), eyre::Report> {
    if !last_report(world)?.synced() {
        return Err(eyre!("expected the refresh to be accepted remotely"));
    }
    Ok(())
}

#[then("the refresh was not synced")]
fn refresh_not_synced(world: &DispatchWorld) -> Result<(), eyre::Report> {
    if last_report(world)?.synced() {
        return Err(eyre!("expected the refresh to be rejected remotely"));
    }
    Ok(())
}

#[then("the refresh is rejected for a missing group id")]
fn refresh_missing_group(world: &DispatchWorld) -> Result<(), eyre::Report> {
    match &world.last_refresh {
        Some(Err(RefreshError::MissingGroupId)) => Ok(()),
        other => Err(eyre!("expected a missing group id rejection, found {other:?}")),
    }
}

fn request_count(world: &DispatchWorld) -> Result<usize, eyre::Report> {
    world
        .registrar
        .requests()
        .map(|requests| requests.len())
        .map_err(|err| eyre!("registrar state: {err}"))
}

#[then("no registration request was sent")]
fn no_request_sent(world: &DispatchWorld) -> Result<(), eyre::Report> {
    let received = request_count(world)?;
    if received != 0 {
        return Err(eyre!("expected no registration requests, found {received}"));
    }
    Ok(())
}

#[then("the registration service received {count:usize} requests")]
fn registration_request_count(world: &DispatchWorld, count: usize) -> Result<(), eyre::Report> {
    let received = request_count(world)?;
    if received != count {
        return Err(eyre!("expected {count} registration requests, found {received}"));
    }
    Ok(())
}

#[then(r#"the global remote commands are "{names}""#)]
fn global_remote_commands(world: &DispatchWorld, names: String) -> Result<(), eyre::Report> {
    let actual = remote_names(world, &RegistrationScope::Global)?;
    let expected = split_list(&names);
    if actual != expected {
        return Err(eyre!("expected remote commands {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the remote commands for group "{group}" are "{names}""#)]
fn group_remote_commands(
    world: &DispatchWorld,
    group: String,
    names: String,
) -> Result<(), eyre::Report> {
    let scope = RegistrationScope::Group(GroupId::new(group)?);
    let actual = remote_names(world, &scope)?;
    let expected = split_list(&names);
    if actual != expected {
        return Err(eyre!("expected remote commands {expected:?}, found {actual:?}"));
    }
    Ok(())
}
