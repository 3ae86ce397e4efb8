//! Lexical path normalization for follower base directories.

use std::path::{Component, Path, PathBuf};

/// Return the shortest path equivalent to `path` by purely lexical processing.
///
/// Repeated separators and `.` segments are dropped, `..` consumes the
/// preceding normal segment, `..` directly under a root is dropped, and
/// trailing separators are removed. The filesystem is never consulted, so
/// symlinks are not resolved. An empty result becomes `"."`.
pub fn clean_path(path: &str) -> String {
    let mut out = PathBuf::new();
    // Normal segments pushed so far; `..` may only pop these.
    let mut depth = 0usize;
    let mut rooted = false;

    for component in Path::new(path).components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => {
                out.push(Component::RootDir.as_os_str());
                rooted = true;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    out.pop();
                    depth -= 1;
                } else if !rooted {
                    out.push("..");
                }
            }
            Component::Normal(segment) => {
                out.push(segment);
                depth += 1;
            }
        }
    }

    if out.as_os_str().is_empty() {
        return ".".to_string();
    }
    out.to_string_lossy().into_owned()
}
