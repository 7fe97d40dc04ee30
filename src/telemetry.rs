//! Structured telemetry initialisation.
//!
//! Dispatch and discovery events are emitted with `tracing` under the
//! `switchyard::dispatch` and `switchyard::discovery` targets. The default
//! filter keeps those at `info` and everything else at `warn`, so a bot
//! embedding the dispatcher sees command traffic without dependency noise.
//! Embedding applications may install their own subscriber instead of
//! calling [`initialise`].

use std::io::{self, IsTerminal};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::{EnvFilter, fmt};

use crate::command::services::{DISCOVERY_TARGET, DISPATCH_TARGET};

static INSTALLED: OnceCell<LogFormat> = OnceCell::new();

/// Output encoding for log lines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// One JSON object per event, fields flattened.
    #[default]
    Json,
    /// Human-readable single-line output.
    Compact,
}

/// Subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive, for example `switchyard::dispatch=debug`.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Output encoding.
    #[serde(default)]
    pub format: LogFormat,
}

/// Filter that logs dispatch and discovery at `info`, and the rest at `warn`.
#[must_use]
pub fn default_filter() -> String {
    format!("warn,{DISPATCH_TARGET}=info,{DISCOVERY_TARGET}=info")
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            format: LogFormat::default(),
        }
    }
}

impl TelemetryConfig {
    /// Replaces the filter directive.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Replaces the output encoding.
    #[must_use]
    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Raises dispatch and discovery logging to `debug`, which adds per
    /// interaction timings and middleware decisions.
    #[must_use]
    pub fn with_dispatch_debug(mut self) -> Self {
        self.filter = format!(
            "{},{DISPATCH_TARGET}=debug,{DISCOVERY_TARGET}=debug",
            self.filter
        );
        self
    }
}

/// Errors encountered while configuring telemetry.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// Directive as configured.
        filter: String,
        /// Parser message.
        reason: String,
    },
    /// Another global subscriber was installed outside this crate.
    #[error("a global tracing subscriber is already installed: {0}")]
    ForeignSubscriber(Arc<SetGlobalDefaultError>),
}

/// Installs the global subscriber on first call.
///
/// Returns the format that is in effect. Later calls leave the installed
/// subscriber untouched and return its format, whatever `config` says.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] for an unparsable filter and
/// [`TelemetryError::ForeignSubscriber`] when a subscriber was installed by
/// other code.
///
/// # Examples
///
/// ```rust
/// use switchyard::telemetry::{self, LogFormat, TelemetryConfig};
///
/// # fn main() -> Result<(), telemetry::TelemetryError> {
/// let format = telemetry::initialise(&TelemetryConfig::default())?;
/// let again = telemetry::initialise(&TelemetryConfig::default().with_format(LogFormat::Compact))?;
/// assert_eq!(format, again);
/// # Ok(())
/// # }
/// ```
pub fn initialise(config: &TelemetryConfig) -> Result<LogFormat, TelemetryError> {
    INSTALLED
        .get_or_try_init(|| {
            let subscriber = build_subscriber(config)?;
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|err| TelemetryError::ForeignSubscriber(Arc::new(err)))?;
            Ok(config.format)
        })
        .copied()
}

fn parse_filter(filter: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(filter).map_err(|err| TelemetryError::InvalidFilter {
        filter: filter.to_owned(),
        reason: err.to_string(),
    })
}

/// Builds the stderr subscriber described by `config` without installing it.
fn build_subscriber(
    config: &TelemetryConfig,
) -> Result<Box<dyn Subscriber + Send + Sync>, TelemetryError> {
    let builder = fmt()
        .with_env_filter(parse_filter(&config.filter)?)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339());

    Ok(match config.format {
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder.compact().finish()),
    })
}
