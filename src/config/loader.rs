//! Configuration loading from disk.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::follow::FollowConfig;
use crate::config::schema::RawConfig;

/// Hard ceiling on the size of a configuration source (2 MiB).
pub const MAX_CONFIG_SIZE: u64 = 2 * 1024 * 1024;

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> ConfigResult<FollowConfig> {
    let mut file = File::open(path)?;
    let size = file.metadata()?.len();
    if size > MAX_CONFIG_SIZE {
        return Err(ConfigError::ConfigTooLarge { size, max: MAX_CONFIG_SIZE });
    }

    // Single read pass, no retry on a short read.
    let mut content = Vec::with_capacity(size as usize);
    let read = file.by_ref().take(size + 1).read_to_end(&mut content)? as u64;
    if read != size {
        return Err(ConfigError::IncompleteRead { expected: size, actual: read });
    }

    tracing::debug!(path = %path.display(), size, "Decoding configuration");
    let content = String::from_utf8(content)
        .map_err(|e| ConfigError::MalformedConfig(format!("config is not valid UTF-8: {}", e)))?;
    load_config_str(&content)
}

/// Decode and validate configuration from an in-memory source.
pub fn load_config_str(content: &str) -> ConfigResult<FollowConfig> {
    let size = content.len() as u64;
    if size > MAX_CONFIG_SIZE {
        return Err(ConfigError::ConfigTooLarge { size, max: MAX_CONFIG_SIZE });
    }

    let raw = RawConfig::from_toml_str(content)?;
    let config = FollowConfig::from_raw(raw)?;

    tracing::info!(
        followers = config.followers().len(),
        targets = config.targets().map(|t| t.len()).unwrap_or(0),
        "Configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
[Global]
Ingest-Secret = "secret"
Cleartext-Backend-Target = ["127.0.0.1:4023"]

[Follower.app]
Base-Directory = "/var/log/app/"
"#;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.follower("app").unwrap().base_directory, "/var/log/app");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let res = load_config(&dir.path().join("nope.conf"));
        assert!(matches!(res, Err(ConfigError::Io(_))));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_size_mismatch_is_incomplete_read() {
        // procfs reports a zero length but produces content.
        let res = load_config(Path::new("/proc/self/status"));
        assert!(matches!(
            res,
            Err(ConfigError::IncompleteRead { expected: 0, actual: 1 })
        ));
    }

    #[test]
    fn test_malformed_source() {
        assert!(matches!(load_config_str("[Global"), Err(ConfigError::MalformedConfig(_))));
        assert!(matches!(
            load_config_str("[Global]\nVerify-Remote-Certificates = \"yes\"\n"),
            Err(ConfigError::MalformedConfig(_))
        ));
    }

    #[test]
    fn test_non_utf8_file_is_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(load_config(file.path()), Err(ConfigError::MalformedConfig(_))));
    }

    #[test]
    fn test_oversized_string_rejected() {
        let content = "#".repeat(MAX_CONFIG_SIZE as usize + 1);
        assert!(matches!(load_config_str(&content), Err(ConfigError::ConfigTooLarge { .. })));
    }
}
