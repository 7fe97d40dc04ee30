//! Two-channel success/failure listener lists.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::command::domain::{DispatchError, Interaction};

/// Outcome channel a listener subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventChannel {
    /// Fired after a handler completes without error.
    Success,
    /// Fired when lookup or handler invocation fails.
    Failure,
}

impl EventChannel {
    /// Returns the canonical channel name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "interaction_success",
            Self::Failure => "interaction_failed",
        }
    }
}

impl fmt::Display for EventChannel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Listener invoked with the interaction and, on failure, the error.
pub type Listener = Arc<dyn Fn(&Interaction, Option<&DispatchError>) + Send + Sync>;

/// Wraps a closure as a [`Listener`].
///
/// Keep the returned `Arc` to remove the listener later; removal compares
/// pointer identity.
pub fn listener<F>(callback: F) -> Listener
where
    F: Fn(&Interaction, Option<&DispatchError>) + Send + Sync + 'static,
{
    Arc::new(callback)
}

/// Listener lists for both channels.
///
/// Firing iterates a snapshot, so listeners may subscribe or unsubscribe
/// from inside a callback. Listener panics are not caught.
#[derive(Default)]
pub struct EventBus {
    success: RwLock<Vec<Listener>>,
    failure: RwLock<Vec<Listener>>,
}

impl EventBus {
    /// Creates a bus with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    const fn channel(&self, channel: EventChannel) -> &RwLock<Vec<Listener>> {
        match channel {
            EventChannel::Success => &self.success,
            EventChannel::Failure => &self.failure,
        }
    }

    /// Appends a listener to a channel.
    pub fn on(&self, channel: EventChannel, listener: Listener) {
        self.channel(channel)
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// Removes every registration of `listener` from a channel.
    pub fn off(&self, channel: EventChannel, listener: &Listener) {
        self.channel(channel)
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|registered| !Arc::ptr_eq(registered, listener));
    }

    /// Returns the number of listeners on a channel.
    #[must_use]
    pub fn listener_count(&self, channel: EventChannel) -> usize {
        self.channel(channel)
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Invokes every listener on a channel in registration order.
    pub fn fire(
        &self,
        channel: EventChannel,
        interaction: &Interaction,
        error: Option<&DispatchError>,
    ) {
        let snapshot = self
            .channel(channel)
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for registered in &snapshot {
            registered(interaction, error);
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("EventBus")
            .field("success", &self.listener_count(EventChannel::Success))
            .field("failure", &self.listener_count(EventChannel::Failure))
            .finish()
    }
}
