//! Path validation
//!
//! Handles file name validation and security checks.

use std::path::{Component, Path};

use crate::error::StorageError;

/// Names starting with this character are hidden from listings
pub const HIDDEN_PREFIX: char = '.';

/// Longest file name accepted, in bytes
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Whether a directory entry name is hidden
pub fn is_hidden(name: &str) -> bool {
    name.starts_with(HIDDEN_PREFIX)
}

/// Validate a client supplied file name.
///
/// A valid name is exactly one normal path component, so joining it onto a
/// category location can never leave that location.
pub fn validate_filename(filename: &str) -> Result<&str, StorageError> {
    if filename.is_empty() {
        return Err(StorageError::InvalidFileName("empty file name".into()));
    }

    if filename.contains('/') || filename.contains('\\') {
        return Err(StorageError::PathTraversal(filename.into()));
    }

    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => {}
        _ => return Err(StorageError::PathTraversal(filename.into())),
    }

    if filename.len() > MAX_FILENAME_LENGTH {
        return Err(StorageError::InvalidFileName(format!(
            "file name longer than {MAX_FILENAME_LENGTH} bytes"
        )));
    }

    if filename.chars().any(char::is_control) {
        return Err(StorageError::InvalidFileName(
            "file name contains control characters".into(),
        ));
    }

    if is_hidden(filename) {
        return Err(StorageError::InvalidFileName(filename.into()));
    }

    Ok(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_names() {
        assert_eq!(validate_filename("island.png").unwrap(), "island.png");
        assert_eq!(validate_filename("island.png.json").unwrap(), "island.png.json");
        assert_eq!(validate_filename("my map (v2).jpg").unwrap(), "my map (v2).jpg");
        assert!(validate_filename("a..b").is_ok());
    }

    #[test]
    fn test_rejects_traversal() {
        for name in [
            "..",
            ".",
            "../../etc/passwd",
            "/etc/passwd",
            "maps/island.png",
            "..\\secret",
            "C:\\Windows",
        ] {
            assert!(
                matches!(validate_filename(name), Err(StorageError::PathTraversal(_))),
                "{name} should be rejected as traversal"
            );
        }
    }

    #[test]
    fn test_rejects_unusable_names() {
        assert!(matches!(
            validate_filename(""),
            Err(StorageError::InvalidFileName(_))
        ));
        assert!(matches!(
            validate_filename(".hidden"),
            Err(StorageError::InvalidFileName(_))
        ));
        assert!(matches!(
            validate_filename("bad\0name"),
            Err(StorageError::InvalidFileName(_))
        ));
        assert!(matches!(
            validate_filename("line\nbreak"),
            Err(StorageError::InvalidFileName(_))
        ));
        let long = "a".repeat(MAX_FILENAME_LENGTH + 1);
        assert!(matches!(
            validate_filename(&long),
            Err(StorageError::InvalidFileName(_))
        ));
    }

    #[test]
    fn test_hidden_detection() {
        assert!(is_hidden(".DS_Store"));
        assert!(is_hidden(".island.png.tmp"));
        assert!(!is_hidden("island.png"));
    }
}
