//! Shared fixtures for configuration integration tests.

use std::io::Write;

use tempfile::NamedTempFile;

/// A complete, valid configuration used as the base for most tests.
pub const FULL_CONFIG: &str = r#"
[Global]
Ingest-Secret = "IngestSecrets"
Connection-Timeout = "30s"
Verify-Remote-Certificates = true
Cleartext-Backend-Target = ["172.20.0.1:4023", "172.20.0.2:4023"]
Encrypted-Backend-Target = ["172.20.0.3:4024"]
Pipe-Backend-Target = ["/opt/gravwell/comms/pipe"]
Log-Level = "INFO"
State-Store-Location = "/opt/gravwell/etc/file_follow.state"
Ingest-Cache-Path = "/opt/gravwell/cache/file_follow.cache"

[Follower.syslog]
Base-Directory = "/var/log/"
File-Filter = "syslog*"
Tag-Name = "syslog"
Assume-Local-Timezone = true

[Follower.auth]
Base-Directory = "/var/log//auth/./"
File-Filter = "auth.log*"
Tag-Name = "syslog"

[Follower.app]
Base-Directory = "/var/log/app/"
File-Filter = "*.log"
Ignore-Timestamps = true
"#;

/// Build a config with the given `[Global]` body and follower sections.
#[allow(dead_code)]
pub fn config_with(global: &str, followers: &str) -> String {
    format!("[Global]\n{}\n{}\n", global, followers)
}

/// Write `content` to a temporary file that lives as long as the handle.
pub fn write_config(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

/// Pad a valid config with a trailing comment so it is exactly `size` bytes.
#[allow(dead_code)]
pub fn padded_to(content: &str, size: usize) -> Vec<u8> {
    let mut out = content.as_bytes().to_vec();
    assert!(out.len() + 2 <= size, "base config larger than target size");
    out.push(b'#');
    out.resize(size - 1, b'x');
    out.push(b'\n');
    assert_eq!(out.len(), size);
    out
}
