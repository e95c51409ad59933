//! Token types produced by the tokenizer and consumed by the parser.
//!
//!     USFM is a flat stream of backslash tags interleaved with text, so the token set is
//!     small: open tags, close tags, three flavours of text and the end marker. The text
//!     flavours matter to the parser:
//!
//!         Text:        ordinary running text, run through literal replacement.
//!         MacroText:   an in-text marker such as `~` or `//`, looked up by key in the
//!                      macro replacement table before falling back to its literal spelling.
//!         NumericText: the verse number directly after a `\v` tag.
//!
//!     Tokens are immutable once produced. Each one carries the location of its first
//!     character so warnings can point back at the source.

use std::fmt;

/// 1-based position of a token in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

/// The kinds of token the parser distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `\name` or `\name ` (spaced). The name excludes the backslash and the space.
    TagOpen { name: String, spaced: bool },
    /// `\name*`. The name excludes the backslash and the star.
    TagClose { name: String, spaced: bool },
    Text { content: String },
    MacroText { key: String, content: String },
    NumericText { content: String, number: u32 },
    EndOfInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, location: Location) -> Self {
        Self { kind, location }
    }

    pub fn end_of_input(location: Location) -> Self {
        Self::new(TokenKind::EndOfInput, location)
    }

    pub fn is_end(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfInput)
    }

    /// Name of the tag if this is an open tag.
    pub fn open_tag(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::TagOpen { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// True if this is an open tag named exactly `name`.
    pub fn is_open_tag(&self, name: &str) -> bool {
        self.open_tag() == Some(name)
    }

    /// Short description used in warnings, e.g. `TAG_OPEN (f) on line 3 column 7`.
    fn label(&self) -> (&'static str, &str) {
        match &self.kind {
            TokenKind::TagOpen { name, .. } => ("TAG_OPEN", name.as_str()),
            TokenKind::TagClose { name, .. } => ("TAG_CLOSE", name.as_str()),
            TokenKind::Text { content } => ("TEXT", content.as_str()),
            TokenKind::MacroText { content, .. } => ("MACRO_TEXT", content.as_str()),
            TokenKind::NumericText { content, .. } => ("NUMERIC_TEXT", content.as_str()),
            TokenKind::EndOfInput => ("EOF", ""),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, data) = self.label();
        let excerpt: String = data.chars().take(20).collect();
        write!(f, "{} ({}) on {}", kind, excerpt, self.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_truncates_data() {
        let token = Token::new(
            TokenKind::Text {
                content: "abcdefghijklmnopqrstuvwxyz".to_string(),
            },
            Location::new(2, 5),
        );
        assert_eq!(
            token.to_string(),
            "TEXT (abcdefghijklmnopqrst) on line 2 column 5"
        );
    }

    #[test]
    fn test_open_tag_helpers() {
        let token = Token::new(
            TokenKind::TagOpen {
                name: "v".to_string(),
                spaced: true,
            },
            Location::new(1, 1),
        );
        assert!(token.is_open_tag("v"));
        assert!(!token.is_open_tag("c"));
        assert!(!token.is_end());
        assert!(Token::end_of_input(Location::default()).is_end());
    }
}
