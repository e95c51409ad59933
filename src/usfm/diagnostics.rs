//! Warnings and errors
//!
//! Nothing in the input can abort an extraction. Malformed configuration lines, bad
//! escapes, unknown tags and unclosed annotations are all recovered from locally; they are
//! logged through `tracing` as they happen and also collected as the values below so callers
//! can inspect them. The one real error is failing to read a configuration file.

use crate::usfm::token::Location;
use std::fmt;

/// A recoverable problem found while interpreting configuration lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A non-empty line without a `:` separator.
    MissingDelimiter { entry: String },
    /// A `Replace*` value that does not split into delimiter, needle and replacement.
    MalformedReplacement { entry: String },
    /// A `ReplaceLiteral` entry whose needle is empty.
    EmptyNeedle { entry: String },
    /// A backslash followed by a character with no escape meaning.
    UnknownEscape { character: char },
    /// A replacement value ending in a lone backslash.
    DanglingEscape,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::MissingDelimiter { entry } => {
                write!(f, "Unknown config entry: |{}|", entry)
            }
            ConfigWarning::MalformedReplacement { entry } => {
                write!(f, "Syntax error parsing replacement table entry: {}", entry)
            }
            ConfigWarning::EmptyNeedle { entry } => {
                write!(f, "Literal replacement with empty needle: {}", entry)
            }
            ConfigWarning::UnknownEscape { character } => {
                write!(f, "Unknown escape character {:?}", character)
            }
            ConfigWarning::DanglingEscape => write!(f, "Unterminated escape at end of value"),
        }
    }
}

/// A recoverable problem found while extracting verses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A chapter tag arrived before any verse of the current chapter.
    EmptyChapter { location: Location },
    /// An open tag in no category and with no replacement.
    UnsupportedTag { tag: String, location: Location },
    /// Input ended while skipping an annotation span.
    UnclosedTag { tag: String, location: Location },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::EmptyChapter { location } => write!(f, "Empty chapter at {}", location),
            ParseWarning::UnsupportedTag { tag, location } => {
                write!(f, "Unsupported tag \\{} on {}", tag, location)
            }
            ParseWarning::UnclosedTag { tag, location } => {
                write!(f, "Unclosed tag \\{} opened on {}", tag, location)
            }
        }
    }
}

/// Errors that stop a configuration source from being read at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io { path: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, message } => {
                write!(f, "Could not read configuration {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
