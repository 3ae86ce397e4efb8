//! Structured logging.
//!
//! # Responsibilities
//! - Map the configured `Log-Level` onto a tracing filter
//! - Initialize the global subscriber before the configuration is read
//! - Switch to the configured level once it is known
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Output goes to stderr so `--dump` output on stdout stays parseable
//! - `RUST_LOG` wins over the configured level when set

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry};

/// Severity threshold configured by `Log-Level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Error)]
#[error("unknown log level {0:?}")]
pub struct LogLevelError(pub String);

impl LogLevel {
    /// Directive understood by `EnvFilter`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl FromStr for LogLevel {
    type Err = LogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "info" => Ok(LogLevel::Info),
            "off" | "none" => Ok(LogLevel::Off),
            "error" | "critical" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LogLevelError(s.to_string())),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter())
    }
}

/// Handle to the installed subscriber's filter.
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    env_override: bool,
}

impl LogHandle {
    /// Apply the configured level. A no-op when `RUST_LOG` is set.
    pub fn apply_level(&self, level: LogLevel) -> Result<(), reload::Error> {
        if self.env_override {
            return Ok(());
        }
        self.filter.reload(EnvFilter::new(level.as_filter()))
    }
}

/// Install the global subscriber at `RUST_LOG`, or at the default level.
///
/// Fails if a subscriber has already been installed.
pub fn init_logging() -> Result<LogHandle, tracing_subscriber::util::TryInitError> {
    let (subscriber, handle) = build_subscriber(EnvFilter::try_from_default_env().ok(), std::io::stderr);
    subscriber.try_init()?;
    Ok(handle)
}

fn build_subscriber<W>(
    env_filter: Option<EnvFilter>,
    writer: W,
) -> (impl tracing::Subscriber + Send + Sync + 'static, LogHandle)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let env_override = env_filter.is_some();
    let (filter, handle) = reload::Layer::new(
        env_filter.unwrap_or_else(|| EnvFilter::new(LogLevel::default().as_filter())),
    );

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(writer));

    (subscriber, LogHandle { filter: handle, env_override })
}
