//! Configuration validation.
//!
//! # Responsibilities
//! - Check the connection timeout syntax and sign
//! - Check mandatory fields (secret, at least one target, at least one follower)
//! - Default empty tag names and reject forbidden tag characters
//! - Normalize follower base directories
//!
//! # Design Decisions
//! - Stops at the first violation; checks run in a fixed order and followers
//!   are visited by name, so the reported error is reproducible
//! - Takes the tree by value and returns it normalized; nothing outside this
//!   function ever sees a half-validated tree

use crate::config::duration::{parse_duration, DurationError, SignedDuration};
use crate::config::error::{ConfigError, ConfigResult};
use crate::config::path::clean_path;
use crate::config::schema::{GlobalConfig, RawConfig};
use crate::tags::{check_tag, DEFAULT_TAG};

/// Parse the connection timeout. A blank value is zero.
pub(crate) fn parse_timeout(global: &GlobalConfig) -> Result<SignedDuration, DurationError> {
    let timeout = global.connection_timeout.trim();
    if timeout.is_empty() {
        return Ok(SignedDuration::ZERO);
    }
    parse_duration(timeout)
}

/// Validate a decoded configuration, returning it normalized.
pub fn validate_config(mut raw: RawConfig) -> ConfigResult<RawConfig> {
    let invalid_timeout = |reason| ConfigError::InvalidTimeout {
        value: raw.global.connection_timeout.clone(),
        reason,
    };
    match parse_timeout(&raw.global) {
        Ok(timeout) if timeout.is_negative() => return Err(invalid_timeout(DurationError::Negative)),
        Ok(_) => {}
        Err(reason) => return Err(invalid_timeout(reason)),
    }

    if raw.global.ingest_secret.is_empty() {
        return Err(ConfigError::MissingSecret);
    }
    if raw.global.target_count() == 0 {
        return Err(ConfigError::NoBackendTargets);
    }
    if raw.followers.is_empty() {
        return Err(ConfigError::NoFollowers);
    }

    for (name, follower) in raw.followers.iter_mut() {
        if follower.base_directory.is_empty() {
            return Err(ConfigError::MissingBaseDirectory(name.clone()));
        }
        if follower.tag_name.is_empty() {
            follower.tag_name = DEFAULT_TAG.to_string();
        }
        if let Err(c) = check_tag(&follower.tag_name) {
            tracing::debug!(follower = %name, tag = %follower.tag_name, forbidden = ?c, "Rejecting tag name");
            return Err(ConfigError::InvalidTagName {
                follower: name.clone(),
                tag: follower.tag_name.clone(),
            });
        }
        follower.base_directory = clean_path(&follower.base_directory);
    }

    Ok(raw)
}
