//! Configuration error types.

use thiserror::Error;

use crate::config::duration::DurationError;

/// Result type for configuration loading and access.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading, validating or querying the
/// configuration. Every variant is terminal for the load attempt.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be opened, stat'ed or read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source exceeds the size ceiling.
    #[error("Config file far too large: {size} bytes (max {max})")]
    ConfigTooLarge { size: u64, max: u64 },

    /// Fewer (or more) bytes were read than the file reported.
    #[error("Failed to read config file: expected {expected} bytes, read {actual}")]
    IncompleteRead { expected: u64, actual: u64 },

    /// The decoder rejected the structure of the file.
    #[error("Malformed config: {0}")]
    MalformedConfig(String),

    #[error("Invalid connection timeout {value:?}: {reason}")]
    InvalidTimeout { value: String, reason: DurationError },

    #[error("Ingest-Secret not specified")]
    MissingSecret,

    #[error("No backend targets specified")]
    NoBackendTargets,

    #[error("No followers specified")]
    NoFollowers,

    #[error("No Base-Directory provided for follower {0:?}")]
    MissingBaseDirectory(String),

    #[error("Invalid characters in the Tag-Name {tag:?} for follower {follower:?}")]
    InvalidTagName { follower: String, tag: String },

    /// Accessor was asked for targets on a tree with none.
    #[error("No connections specified")]
    NoConnections,

    /// Accessor was asked for tags on a tree with none.
    #[error("No tags specified")]
    NoTags,
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::MalformedConfig(e.to_string())
    }
}
