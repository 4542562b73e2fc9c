//! Logging bootstrap for netmon
//!
//! Configures a `tracing` subscriber. Pipeline stages emit `debug!` events
//! with before/after cell counts and `trace!` events for individual
//! heuristic decisions, so `RUST_LOG=netmon_core=trace` shows why a cell
//! was changed or dropped.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::Error;

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Every heuristic decision
    Trace,
    /// Per-stage summaries
    Debug,
    /// Default
    #[default]
    Info,
    /// Failed sources and suspicious input
    Warn,
    /// Least verbose
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("unknown log level: {s}")),
        }
    }
}

fn build_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Initialize the tracing subscriber with the specified log level.
///
/// Call once at startup. `RUST_LOG` takes precedence over `level`. Events
/// are written to stderr.
///
/// # Example
///
/// ```
/// use netmon_common::logging::{init_logging, LogLevel};
///
/// init_logging(LogLevel::Debug);
/// ```
pub fn init_logging(level: LogLevel) {
    init_logging_with_filter(&level.to_string());
}

/// Initialize logging with a custom filter string such as
/// `"info,netmon_core::postprocess=trace"`.
pub fn init_logging_with_filter(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(filter))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::NONE)
        .init();
}

/// Initialize logging from a [`LoggingConfig`], reporting instead of
/// panicking when a global subscriber is already installed.
pub fn try_init_logging(config: &LoggingConfig) -> Result<(), Error> {
    let directive = match &config.filter {
        Some(filter) => filter.clone(),
        None => config.level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(&directive))
        .with_writer(std::io::stderr)
        .with_target(config.with_target)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::NONE)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
