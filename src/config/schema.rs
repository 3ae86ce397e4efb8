//! Configuration schema definitions.
//!
//! This module defines the raw configuration tree exactly as it is decoded
//! from the file, before validation. Section and key names are matched
//! case-insensitively and `_` is interchangeable with `-`, so
//! `ingest_secret` and `INGEST-SECRET` both reach `Ingest-Secret`. Follower
//! names are kept exactly as written.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use toml::{Table, Value};

/// Root of the decoded configuration file.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// Agent-wide settings.
    #[serde(rename = "Global")]
    pub global: GlobalConfig,

    /// Follower definitions keyed by name, iterated in name order.
    #[serde(rename = "Follower")]
    pub followers: BTreeMap<String, FollowerConfig>,
}

/// The `[Global]` section.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Where the agent keeps its file-position state.
    #[serde(rename = "State-Store-Location")]
    pub state_store_location: String,

    /// Shared secret used to authenticate with backends.
    #[serde(rename = "Ingest-Secret")]
    pub ingest_secret: String,

    /// Dial timeout, e.g. `"30s"`. Blank means no timeout.
    #[serde(rename = "Connection-Timeout")]
    pub connection_timeout: String,

    #[serde(rename = "Verify-Remote-Certificates")]
    pub verify_remote_certificates: bool,

    /// Plaintext `host:port` targets.
    #[serde(rename = "Cleartext-Backend-Target")]
    pub cleartext_backend_targets: Vec<String>,

    /// TLS `host:port` targets.
    #[serde(rename = "Encrypted-Backend-Target")]
    pub encrypted_backend_targets: Vec<String>,

    /// Local pipe paths.
    #[serde(rename = "Pipe-Backend-Target")]
    pub pipe_backend_targets: Vec<String>,

    #[serde(rename = "Log-Level")]
    pub log_level: String,

    /// On-disk ingest cache; empty disables caching.
    #[serde(rename = "Ingest-Cache-Path")]
    pub ingest_cache_path: String,
}

impl RawConfig {
    /// Decode a TOML source, matching section and key names case-insensitively.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let mut root = canonicalize_keys(content.parse::<Table>()?)?;

        if let Some(Value::Table(global)) = root.get_mut("Global") {
            *global = canonicalize_keys(std::mem::take(global))?;
        }
        if let Some(Value::Table(followers)) = root.get_mut("Follower") {
            for (_, follower) in followers.iter_mut() {
                if let Value::Table(follower) = follower {
                    *follower = canonicalize_keys(std::mem::take(follower))?;
                }
            }
        }

        RawConfig::deserialize(Value::Table(root))
    }
}

/// `ingest_secret` → `Ingest-Secret`.
fn canonical_key(key: &str) -> String {
    key.split(['-', '_'])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn canonicalize_keys(table: Table) -> Result<Table, toml::de::Error> {
    let mut out = Table::new();
    for (key, value) in table {
        let canonical = canonical_key(&key);
        if out.contains_key(&canonical) {
            return Err(toml::de::Error::custom(format!("duplicate key {:?} (as {:?})", key, canonical)));
        }
        out.insert(canonical, value);
    }
    Ok(out)
}

impl GlobalConfig {
    /// Number of backend targets across all transports.
    pub fn target_count(&self) -> usize {
        self.cleartext_backend_targets.len()
            + self.encrypted_backend_targets.len()
            + self.pipe_backend_targets.len()
    }
}

/// A `[Follower.<name>]` section.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FollowerConfig {
    /// Directory to watch.
    #[serde(rename = "Base-Directory")]
    pub base_directory: String,

    /// Glob matched against file names in the base directory.
    #[serde(rename = "File-Filter")]
    pub file_filter: String,

    #[serde(rename = "Tag-Name")]
    pub tag_name: String,

    /// Stamp entries with arrival time instead of parsing timestamps.
    #[serde(rename = "Ignore-Timestamps")]
    pub ignore_timestamps: bool,

    /// Interpret zone-less timestamps in the local timezone.
    #[serde(rename = "Assume-Local-Timezone")]
    pub assume_local_timezone: bool,
}
