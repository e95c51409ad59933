//! Property-based tests for substitution, escapes and the extraction pipeline
//!
//! These check the rewrite rules against simple reference models and make sure
//! arbitrary USFM-ish input never panics the lexer or parser.

use proptest::prelude::*;
use usfm::usfm::config::escape::decode;
use usfm::usfm::config::LiteralRule;
use usfm::usfm::lexing::{TokenSource, UsfmLexer};
use usfm::usfm::substitution::{handle_whitespace, substitute_literals};
use usfm::usfm::{parse_book, UsfmConfig};

const NEEDLES: [char; 5] = ['a', 'b', 'c', 'd', 'e'];

/// Rules replacing each needle letter with a short lowercase word, which may itself
/// contain other needles.
fn rules_strategy() -> impl Strategy<Value = Vec<LiteralRule>> {
    prop::collection::vec("[a-z]{0,3}", NEEDLES.len()).prop_map(|replacements| {
        NEEDLES
            .iter()
            .zip(replacements)
            .map(|(needle, replacement)| LiteralRule {
                needle: needle.to_string(),
                replacement,
            })
            .collect()
    })
}

/// Strategy for short USFM fragments built from tags, markers and text
fn usfm_strategy() -> impl Strategy<Value = String> {
    r"[\\a-z0-9 ~/*\n-]{0,60}"
}

proptest! {
    #[test]
    fn test_single_char_needles_match_reference(text in "[a-z ]{0,40}", rules in rules_strategy()) {
        let expected: String = text
            .chars()
            .map(|c| {
                rules
                    .iter()
                    .find(|rule| rule.needle.starts_with(c))
                    .map_or_else(|| c.to_string(), |rule| rule.replacement.clone())
            })
            .collect();
        prop_assert_eq!(substitute_literals(&text, &rules), expected);
    }

    #[test]
    fn test_whitespace_collapse_keeps_words(text in "[a-z \t]{0,40}") {
        let collapsed = handle_whitespace(text.clone(), false);
        prop_assert!(!collapsed.contains("  "));
        prop_assert_eq!(collapsed.replace(' ', ""), text.replace(' ', ""));
        prop_assert_eq!(handle_whitespace(text.clone(), true), text);
    }

    #[test]
    fn test_decode_without_backslash_is_identity(text in "[^\\\\]{0,30}") {
        prop_assert_eq!(decode(&text), text);
    }

    #[test]
    fn test_decode_never_panics(text in r"[\\0-9a-fu nrtbq]{0,30}") {
        let _ = decode(&text);
    }

    #[test]
    fn test_lexer_terminates_with_sticky_end(source in usfm_strategy()) {
        let mut lexer = UsfmLexer::new(&source);
        let mut count = 0;
        while !lexer.next_token().is_end() {
            count += 1;
            prop_assert!(count <= source.len() + 1);
        }
        prop_assert!(lexer.next_token().is_end());
    }

    #[test]
    fn test_parse_book_never_panics(body in usfm_strategy()) {
        let config = UsfmConfig::new();
        let source = format!("\\c 1 \\v 1 {}", body);
        for chapter in parse_book(&source, &config) {
            prop_assert_eq!(chapter.all_verses, chapter.verses.concat());
            let heading_bytes: usize = chapter.heading_info.iter().map(|h| h.len).sum();
            prop_assert_eq!(heading_bytes, chapter.all_headings.len());
            prop_assert!(chapter.heading_info.iter().all(|h| h.verse_index <= chapter.verses.len()));
        }
    }
}
