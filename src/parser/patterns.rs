// file: src/parser/patterns.rs
// description: compiled regex patterns for manifest and python source scanning
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Package identifiers and extras share the same shape
    pub static ref PACKAGE_NAME: Regex = Regex::new(
        r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?$"
    ).expect("PACKAGE_NAME regex is valid");

    pub static ref NAME_SEPARATORS: Regex = Regex::new(
        r"[-_.]+"
    ).expect("NAME_SEPARATORS regex is valid");

    pub static ref VERSION: Regex = Regex::new(
        r"^[A-Za-z0-9.*+!_-]+$"
    ).expect("VERSION regex is valid");

    // A '#' only starts a comment when preceded by whitespace, so url fragments survive
    pub static ref INLINE_COMMENT: Regex = Regex::new(
        r"\s+#"
    ).expect("INLINE_COMMENT regex is valid");

    pub static ref URL_MARKER_SEPARATOR: Regex = Regex::new(
        r"\s+;"
    ).expect("URL_MARKER_SEPARATOR regex is valid");

    // Python import statements
    pub static ref IMPORT_STATEMENT: Regex = Regex::new(
        r"^\s*import\s+([A-Za-z_][\w.]*(?:\s+as\s+\w+)?(?:\s*,\s*[A-Za-z_][\w.]*(?:\s+as\s+\w+)?)*)"
    ).expect("IMPORT_STATEMENT regex is valid");

    pub static ref FROM_IMPORT: Regex = Regex::new(
        r"^\s*from\s+(\.*)([A-Za-z_][\w.]*)?\s+import\b"
    ).expect("FROM_IMPORT regex is valid");
}

pub fn is_valid_identifier(name: &str) -> bool {
    PACKAGE_NAME.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_name_pattern() {
        assert!(is_valid_identifier("numpy"));
        assert!(is_valid_identifier("scikit-learn"));
        assert!(is_valid_identifier("zope.interface"));
        assert!(is_valid_identifier("a"));
        assert!(!is_valid_identifier("-numpy"));
        assert!(!is_valid_identifier("numpy-"));
        assert!(!is_valid_identifier("num py"));
        assert!(!is_valid_identifier("numpy$"));
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn test_inline_comment_pattern() {
        assert!(INLINE_COMMENT.is_match("numpy  # arrays"));
        assert!(!INLINE_COMMENT.is_match("pkg @ https://host/pkg.zip#egg=pkg"));
    }

    #[test]
    fn test_import_patterns() {
        let caps = IMPORT_STATEMENT.captures("import numpy as np").unwrap();
        assert_eq!(&caps[1], "numpy as np");

        let caps = FROM_IMPORT.captures("from sklearn.metrics import f1").unwrap();
        assert_eq!(caps.get(1).map(|m| m.as_str()), Some(""));
        assert_eq!(caps.get(2).map(|m| m.as_str()), Some("sklearn.metrics"));

        let caps = FROM_IMPORT.captures("from .connection import get").unwrap();
        assert_eq!(caps.get(1).map(|m| m.as_str()), Some("."));
    }
}
