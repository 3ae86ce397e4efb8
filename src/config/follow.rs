//! Validated, read-only configuration handed to the rest of the agent.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::schema::{FollowerConfig, RawConfig};
use crate::config::validation::{parse_timeout, validate_config};

/// Validated agent configuration.
///
/// The only way to obtain one is through validation (normally via
/// [`load_config`](crate::config::loader::load_config)), and nothing can
/// mutate it afterwards. It is `Send + Sync`, so the agent may share it
/// behind an `Arc` without locking. Every accessor returns an owned value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowConfig {
    raw: RawConfig,
}

impl FollowConfig {
    /// Validate a decoded tree and freeze it.
    pub fn from_raw(raw: RawConfig) -> ConfigResult<Self> {
        let raw = validate_config(raw)?;
        Ok(Self { raw })
    }

    /// Connection URIs: cleartext targets as `tcp://`, then encrypted
    /// targets as `tls://`, then pipes as `pipe://`.
    pub fn targets(&self) -> ConfigResult<Vec<String>> {
        let global = &self.raw.global;
        let conns: Vec<String> = global
            .cleartext_backend_targets
            .iter()
            .map(|t| format!("tcp://{}", t))
            .chain(global.encrypted_backend_targets.iter().map(|t| format!("tls://{}", t)))
            .chain(global.pipe_backend_targets.iter().map(|t| format!("pipe://{}", t)))
            .collect();

        if conns.is_empty() {
            return Err(ConfigError::NoConnections);
        }
        Ok(conns)
    }

    /// Distinct tag names in follower-name order.
    pub fn tags(&self) -> ConfigResult<Vec<String>> {
        let mut tags: Vec<String> = Vec::new();
        for follower in self.raw.followers.values() {
            // Unreachable after validation, kept in case defaulting is relaxed.
            if follower.tag_name.is_empty() {
                continue;
            }
            if !tags.contains(&follower.tag_name) {
                tags.push(follower.tag_name.clone());
            }
        }

        if tags.is_empty() {
            return Err(ConfigError::NoTags);
        }
        Ok(tags)
    }

    pub fn verify_remote(&self) -> bool {
        self.raw.global.verify_remote_certificates
    }

    /// Connection timeout; zero means no timeout is enforced.
    pub fn timeout(&self) -> Duration {
        match parse_timeout(&self.raw.global) {
            Ok(timeout) if timeout.is_positive() => timeout.as_duration(),
            _ => Duration::ZERO,
        }
    }

    pub fn secret(&self) -> &str {
        &self.raw.global.ingest_secret
    }

    pub fn log_level(&self) -> &str {
        &self.raw.global.log_level
    }

    pub fn cache_path(&self) -> &str {
        &self.raw.global.ingest_cache_path
    }

    pub fn cache_enabled(&self) -> bool {
        !self.raw.global.ingest_cache_path.is_empty()
    }

    pub fn state_path(&self) -> &str {
        &self.raw.global.state_store_location
    }

    /// Snapshot of all followers keyed by name.
    pub fn followers(&self) -> BTreeMap<String, FollowerConfig> {
        self.raw.followers.clone()
    }

    /// Snapshot of a single follower.
    pub fn follower(&self, name: &str) -> Option<FollowerConfig> {
        self.raw.followers.get(name).cloned()
    }

    /// Copy of the whole validated tree.
    pub fn to_raw(&self) -> RawConfig {
        self.raw.clone()
    }
}

impl TryFrom<RawConfig> for FollowConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> ConfigResult<Self> {
        Self::from_raw(raw)
    }
}
