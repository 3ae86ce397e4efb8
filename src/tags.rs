//! Tag naming rules shared with the tagging subsystem.
//!
//! Tags are short labels attached to every ingested entry and are used
//! downstream for routing, so they are limited to characters that are safe
//! in the ingest protocol and in query syntax.

/// Characters that may never appear in a tag name.
pub const FORBIDDEN_TAG_SET: &str = "!@#$%^&*()=+<>,.:;`\"'{[}]|\\ \t\r\n";

/// Tag applied to a follower that does not name one.
pub const DEFAULT_TAG: &str = "default";

/// Check a tag name, returning the first forbidden character found.
pub fn check_tag(tag: &str) -> Result<(), char> {
    match tag.chars().find(|c| FORBIDDEN_TAG_SET.contains(*c)) {
        Some(c) => Err(c),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tags() {
        assert!(check_tag("syslog").is_ok());
        assert!(check_tag("app-logs_2").is_ok());
        assert!(check_tag(DEFAULT_TAG).is_ok());
    }

    #[test]
    fn test_forbidden_characters() {
        assert_eq!(check_tag("bad tag!"), Err(' '));
        assert_eq!(check_tag("bad!"), Err('!'));
        assert_eq!(check_tag("a.b"), Err('.'));
        assert_eq!(check_tag("tab\there"), Err('\t'));
    }
}
