//! Base tokenization implementation for the USFM lexer
//!
//! This module provides the raw tokenization using the logos lexer library.
//! Raw tokens are deliberately fine grained: text is split at every character that
//! could start something interesting (backslash, `~`, `/`, line breaks). Merging the
//! pieces back together and spotting verse numbers is context sensitive, so that is
//! left to [`UsfmLexer`](super::stream::UsfmLexer).

use logos::Logos;

/// All tokens produced by the logos pass.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
pub enum RawToken {
    // Tags: \name* closes, \name opens. A single trailing space belongs to the opening tag.
    #[regex(r"\\[A-Za-z0-9]+\*", |lex| tag_name(lex.slice(), 1))]
    TagClose(String),
    #[regex(r"\\[A-Za-z0-9]+ ", |lex| tag_name(lex.slice(), 1))]
    TagOpenSpaced(String),
    #[regex(r"\\[A-Za-z0-9]+", |lex| tag_name(lex.slice(), 0))]
    TagOpen(String),

    // In-text markers
    #[token("~")]
    NonBreakingSpace,
    #[token("//")]
    OptionalBreak,

    // Text pieces
    #[token("/")]
    Slash,
    #[token("\\")]
    Backslash,
    #[regex(r"\r\n|\n|\r")]
    Newline,
    #[regex(r"[^\\~/\r\n]+", |lex| lex.slice().to_string())]
    Text(String),
}

fn tag_name(slice: &str, trailing: usize) -> String {
    slice[1..slice.len() - trailing].to_string()
}

impl RawToken {
    /// The text this piece contributes when merged into a run of running text.
    /// Line breaks fold into a single space; tags and markers are not text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawToken::Text(text) => Some(text),
            RawToken::Slash => Some("/"),
            RawToken::Backslash => Some("\\"),
            RawToken::Newline => Some(" "),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<RawToken> {
        RawToken::lexer(source).filter_map(Result::ok).collect()
    }

    #[test]
    fn test_tags() {
        assert_eq!(
            kinds(r"\v 1\wj\wj*"),
            vec![
                RawToken::TagOpenSpaced("v".to_string()),
                RawToken::Text("1".to_string()),
                RawToken::TagOpen("wj".to_string()),
                RawToken::TagClose("wj".to_string()),
            ]
        );
    }

    #[test]
    fn test_numbered_tag_name() {
        assert_eq!(kinds(r"\q1 "), vec![RawToken::TagOpenSpaced("q1".to_string())]);
    }

    #[test]
    fn test_only_one_space_belongs_to_tag() {
        assert_eq!(
            kinds("\\p  text"),
            vec![
                RawToken::TagOpenSpaced("p".to_string()),
                RawToken::Text(" text".to_string()),
            ]
        );
    }

    #[test]
    fn test_markers_and_slashes() {
        assert_eq!(
            kinds("a~b//c/d"),
            vec![
                RawToken::Text("a".to_string()),
                RawToken::NonBreakingSpace,
                RawToken::Text("b".to_string()),
                RawToken::OptionalBreak,
                RawToken::Text("c".to_string()),
                RawToken::Slash,
                RawToken::Text("d".to_string()),
            ]
        );
    }

    #[test]
    fn test_lone_backslash_and_newlines() {
        assert_eq!(
            kinds("a\\ b\r\nc"),
            vec![
                RawToken::Text("a".to_string()),
                RawToken::Backslash,
                RawToken::Text(" b".to_string()),
                RawToken::Newline,
                RawToken::Text("c".to_string()),
            ]
        );
    }

    #[test]
    fn test_spans() {
        let spans: Vec<_> = RawToken::lexer(r"\c 1").spanned().map(|(_, span)| span).collect();
        assert_eq!(spans, vec![0..3, 3..4]);
    }

    #[test]
    fn test_empty_input() {
        assert!(kinds("").is_empty());
    }
}
