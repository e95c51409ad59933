//! Reading configuration from line-oriented sources
//!
//! External sources use the same `Param: Value` lines as the built-in defaults, with a
//! little extra syntax for files:
//!
//! - lines starting with `//` are comments
//! - blank lines are ignored
//! - a line starting with whitespace continues the previous entry
//!
//! [`logical_entries`] folds a source into the entries the interpreter consumes.

use crate::usfm::diagnostics::ConfigError;
use std::fs;
use std::path::Path;

/// Split `source` into logical configuration entries.
pub fn logical_entries(source: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut current = String::new();

    for line in source.lines() {
        if line.starts_with("//") || line.trim().is_empty() {
            continue;
        }
        if line.starts_with(char::is_whitespace) {
            current.push_str(line);
            continue;
        }
        if !current.is_empty() {
            entries.push(std::mem::take(&mut current));
        }
        current.push_str(line);
    }
    if !current.is_empty() {
        entries.push(current);
    }

    entries
}

/// Read a configuration file into a string.
pub fn read_source(path: impl AsRef<Path>) -> Result<String, ConfigError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let source = "// settings\n\nSingularTags: p\n   \nSignificantWhitespace: true\n";
        assert_eq!(
            logical_entries(source),
            vec!["SingularTags: p", "SignificantWhitespace: true"]
        );
    }

    #[test]
    fn test_indented_lines_continue_previous_entry() {
        let source = "SingularTags: p m\n  q pi\n\tli\nDoubleTextualTags: nd";
        assert_eq!(
            logical_entries(source),
            vec!["SingularTags: p m  q pi\tli", "DoubleTextualTags: nd"]
        );
    }

    #[test]
    fn test_empty_source() {
        assert!(logical_entries("").is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = read_source("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
