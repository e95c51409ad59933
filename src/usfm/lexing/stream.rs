//! Token sources and the pushback adapter
//!
//! The parser does not care where tokens come from, only that they arrive through a
//! [`TokenSource`]. [`UsfmLexer`] is the in-crate source built on the logos pass;
//! [`TokenList`] replays a prepared token sequence. [`TokenStream`] wraps either one
//! with a single slot of pushback, which is all the lookahead the parser ever needs.

use super::base_tokenization::RawToken;
use crate::usfm::token::{Location, Token, TokenKind};
use logos::Logos;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::VecDeque;
use std::ops::Range;

/// Verse number at the start of the text following `\v`: digits, an optional
/// `-digits` range and at most one trailing space.
static VERSE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*([0-9]+)(?:-[0-9]+)? ?").unwrap());

/// Anything that can hand out tokens one at a time.
///
/// Once exhausted, a source must keep returning [`TokenKind::EndOfInput`].
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// Tokenizer for USFM source text.
pub struct UsfmLexer<'s> {
    raw: logos::Lexer<'s, RawToken>,
    line_starts: Vec<usize>,
    peeked: Option<(RawToken, Range<usize>)>,
    queued: VecDeque<Token>,
    after_verse_tag: bool,
    end: usize,
}

impl<'s> UsfmLexer<'s> {
    pub fn new(source: &'s str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            raw: RawToken::lexer(source),
            line_starts,
            peeked: None,
            queued: VecDeque::new(),
            after_verse_tag: false,
            end: source.len(),
        }
    }

    fn location_at(&self, offset: usize) -> Location {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let column = offset - self.line_starts[line - 1] + 1;
        Location::new(line, column)
    }

    fn pull(&mut self) -> Option<(RawToken, Range<usize>)> {
        if let Some(peeked) = self.peeked.take() {
            return Some(peeked);
        }
        loop {
            match self.raw.next()? {
                Ok(token) => return Some((token, self.raw.span())),
                Err(()) => continue,
            }
        }
    }

    /// Merge consecutive text pieces starting with `first` into one string.
    fn merge_text(&mut self, first: &str) -> String {
        let mut text = first.to_string();
        while let Some((raw, span)) = self.pull() {
            match raw.as_text() {
                Some(piece) => text.push_str(piece),
                None => {
                    self.peeked = Some((raw, span));
                    break;
                }
            }
        }
        text
    }

    /// Emit text, splitting off a leading verse number when the text follows `\v`.
    fn text_token(&mut self, text: String, start: usize, after_verse_tag: bool) -> Token {
        if after_verse_tag {
            if let Some(found) = VERSE_NUMBER.captures(&text) {
                let whole = &found[0];
                // Only overflow can fail here; such numbers saturate.
                let number = found[1].parse::<u32>().unwrap_or(u32::MAX);
                let rest = &text[whole.len()..];
                if !rest.is_empty() {
                    let location = self.location_at(start + whole.len());
                    self.queued.push_back(Token::new(
                        TokenKind::Text {
                            content: rest.to_string(),
                        },
                        location,
                    ));
                }
                return Token::new(
                    TokenKind::NumericText {
                        content: whole.to_string(),
                        number,
                    },
                    self.location_at(start),
                );
            }
        }
        Token::new(TokenKind::Text { content: text }, self.location_at(start))
    }
}

impl TokenSource for UsfmLexer<'_> {
    fn next_token(&mut self) -> Token {
        if let Some(token) = self.queued.pop_front() {
            return token;
        }
        let Some((raw, span)) = self.pull() else {
            return Token::end_of_input(self.location_at(self.end));
        };
        let location = self.location_at(span.start);
        let after_verse_tag = std::mem::take(&mut self.after_verse_tag);

        let kind = match raw {
            RawToken::TagOpen(name) | RawToken::TagOpenSpaced(name) => {
                let spaced = span.len() == name.len() + 2;
                self.after_verse_tag = name == "v";
                TokenKind::TagOpen { name, spaced }
            }
            RawToken::TagClose(name) => TokenKind::TagClose {
                name,
                spaced: false,
            },
            RawToken::NonBreakingSpace => TokenKind::MacroText {
                key: "--nbsp--".to_string(),
                content: "~".to_string(),
            },
            RawToken::OptionalBreak => TokenKind::MacroText {
                key: "--newline--".to_string(),
                content: "//".to_string(),
            },
            other => {
                let first = other.as_text().unwrap_or_default().to_string();
                let text = self.merge_text(&first);
                return self.text_token(text, span.start, after_verse_tag);
            }
        };
        Token::new(kind, location)
    }
}

/// Replays a prepared token sequence, then reports end of input forever.
#[derive(Debug, Clone, Default)]
pub struct TokenList {
    tokens: VecDeque<Token>,
    last: Location,
}

impl TokenList {
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
            last: Location::default(),
        }
    }

    /// Build a list from bare kinds, numbering tokens by position on line 1.
    pub fn from_kinds(kinds: impl IntoIterator<Item = TokenKind>) -> Self {
        Self::new(
            kinds
                .into_iter()
                .enumerate()
                .map(|(i, kind)| Token::new(kind, Location::new(1, i + 1))),
        )
    }
}

impl TokenSource for TokenList {
    fn next_token(&mut self) -> Token {
        match self.tokens.pop_front() {
            Some(token) => {
                self.last = token.location;
                if token.is_end() {
                    self.tokens.clear();
                }
                token
            }
            None => Token::end_of_input(self.last),
        }
    }
}

/// One-token pushback over a [`TokenSource`].
pub struct TokenStream<S> {
    source: S,
    pushed_back: Option<Token>,
}

impl<S: TokenSource> TokenStream<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            pushed_back: None,
        }
    }

    /// The pushed back token if there is one, otherwise the next token from the source.
    pub fn next(&mut self) -> Token {
        match self.pushed_back.take() {
            Some(token) => token,
            None => self.source.next_token(),
        }
    }

    /// Return a token to the stream for the following [`next`](Self::next) call.
    ///
    /// # Panics
    ///
    /// If a token is already pushed back. Only one slot exists; a second push is a bug
    /// in the caller, not a property of the input.
    pub fn push_back(&mut self, token: Token) {
        assert!(
            self.pushed_back.is_none(),
            "token pushed back twice without being consumed: {}",
            token
        );
        self.pushed_back = Some(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = UsfmLexer::new(source);
        let mut kinds = Vec::new();
        loop {
            let token = lexer.next_token();
            if token.is_end() {
                return kinds;
            }
            kinds.push(token.kind);
        }
    }

    fn open(name: &str, spaced: bool) -> TokenKind {
        TokenKind::TagOpen {
            name: name.to_string(),
            spaced,
        }
    }

    fn text(content: &str) -> TokenKind {
        TokenKind::Text {
            content: content.to_string(),
        }
    }

    #[test]
    fn test_verse_number_is_split_off() {
        assert_eq!(
            kinds(r"\v 12 In the beginning"),
            vec![
                open("v", true),
                TokenKind::NumericText {
                    content: "12 ".to_string(),
                    number: 12,
                },
                text("In the beginning"),
            ]
        );
    }

    #[test]
    fn test_verse_range() {
        assert_eq!(
            kinds(r"\v 3-4 text"),
            vec![
                open("v", true),
                TokenKind::NumericText {
                    content: "3-4 ".to_string(),
                    number: 3,
                },
                text("text"),
            ]
        );
    }

    #[test]
    fn test_oversized_verse_number_saturates() {
        assert_eq!(
            kinds(r"\v 99999999999 text"),
            vec![
                open("v", true),
                TokenKind::NumericText {
                    content: "99999999999 ".to_string(),
                    number: u32::MAX,
                },
                text("text"),
            ]
        );
    }

    #[test]
    fn test_chapter_number_stays_text() {
        assert_eq!(kinds(r"\c 1"), vec![open("c", true), text("1")]);
    }

    #[test]
    fn test_numbers_after_other_tags_stay_text() {
        assert_eq!(
            kinds(r"\p 1 text"),
            vec![open("p", true), text("1 text")]
        );
    }

    #[test]
    fn test_text_pieces_merge_and_newlines_fold() {
        assert_eq!(
            kinds("a/b\nc\\ d\\f*"),
            vec![
                text("a/b c\\ d"),
                TokenKind::TagClose {
                    name: "f".to_string(),
                    spaced: false,
                },
            ]
        );
    }

    #[test]
    fn test_macro_markers() {
        assert_eq!(
            kinds("a~b//"),
            vec![
                text("a"),
                TokenKind::MacroText {
                    key: "--nbsp--".to_string(),
                    content: "~".to_string(),
                },
                text("b"),
                TokenKind::MacroText {
                    key: "--newline--".to_string(),
                    content: "//".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_locations() {
        let mut lexer = UsfmLexer::new("\\c 1\n\\v 1 Text");
        assert_eq!(lexer.next_token().location, Location::new(1, 1));
        assert_eq!(lexer.next_token().location, Location::new(1, 4));
        let verse = lexer.next_token();
        assert!(verse.is_open_tag("v"));
        assert_eq!(verse.location, Location::new(2, 1));
        assert_eq!(lexer.next_token().location, Location::new(2, 4));
        assert_eq!(lexer.next_token().location, Location::new(2, 6));
    }

    #[test]
    fn test_end_of_input_is_sticky() {
        let mut lexer = UsfmLexer::new("x");
        assert!(!lexer.next_token().is_end());
        assert!(lexer.next_token().is_end());
        assert!(lexer.next_token().is_end());
    }

    #[test]
    fn test_pushback_returns_token_once() {
        let mut stream = TokenStream::new(TokenList::from_kinds(vec![text("a"), text("b")]));
        let first = stream.next();
        stream.push_back(first.clone());
        assert_eq!(stream.next(), first);
        assert_eq!(stream.next().kind, text("b"));
        assert!(stream.next().is_end());
        assert!(stream.next().is_end());
    }

    #[test]
    #[should_panic(expected = "pushed back twice")]
    fn test_double_pushback_panics() {
        let mut stream = TokenStream::new(TokenList::from_kinds(vec![text("a"), text("b")]));
        let a = stream.next();
        let b = stream.next();
        stream.push_back(a);
        stream.push_back(b);
    }
}
