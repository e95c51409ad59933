//! Verse and chapter extraction
//!
//!     The parser is a small state machine over the token stream. Every open tag it meets
//!     inside a verse is classified against the configuration, in this order:
//!
//!         v, c, heading tag     ends the current verse (or heading)
//!         macro key            its replacement is appended
//!         singular / textual   the tag is ignored, its text is read as verse text
//!         greedy               everything up to the next greedy tag is discarded
//!         annotation           everything up to the matching close tag is discarded
//!         anything else        reported as unsupported and dropped
//!
//!     Close tags contribute their `name*` replacement if there is one and nothing
//!     otherwise. Text goes through literal replacement; marker tokens use their macro
//!     replacement when one is registered.
//!
//!     The kind of token that ended a verse is kept as a `Boundary` so the chapter loop can
//!     see whether it was a new verse, a heading or the next chapter.

use super::chapter::Chapter;
use crate::usfm::config::UsfmConfig;
use crate::usfm::diagnostics::ParseWarning;
use crate::usfm::lexing::{TokenSource, TokenStream, UsfmLexer};
use crate::usfm::substitution::Substitutions;
use crate::usfm::token::{Location, Token, TokenKind};

/// What the last token read means for the unit that just ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Verse,
    Chapter,
    Heading,
    Other,
}

pub struct Parser<'c, S> {
    config: &'c UsfmConfig,
    substitutions: Substitutions<'c>,
    tokens: TokenStream<S>,
    boundary: Boundary,
    empty_verse: Option<String>,
    warnings: Vec<ParseWarning>,
}

impl<'c, 's> Parser<'c, UsfmLexer<'s>> {
    /// Parser over USFM source text.
    pub fn for_source(source: &'s str, config: &'c UsfmConfig) -> Self {
        Self::new(UsfmLexer::new(source), config)
    }
}

impl<'c, S: TokenSource> Parser<'c, S> {
    pub fn new(source: S, config: &'c UsfmConfig) -> Self {
        Self {
            config,
            substitutions: Substitutions::new(config),
            tokens: TokenStream::new(source),
            boundary: Boundary::Other,
            empty_verse: None,
            warnings: Vec::new(),
        }
    }

    /// Text to use for verses that extract to nothing.
    pub fn with_empty_verse(mut self, text: impl Into<String>) -> Self {
        self.empty_verse = Some(text.into());
        self
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Skip to the first chapter tag, then parse chapters until input runs out.
    pub fn parse_book(&mut self) -> Vec<Chapter> {
        loop {
            let token = self.lex();
            if token.is_end() {
                return Vec::new();
            }
            if token.is_open_tag("c") {
                break;
            }
        }

        let mut chapters = Vec::new();
        while let Some(chapter) = self.parse_chapter() {
            chapters.push(chapter);
        }
        chapters
    }

    /// Parse one chapter, starting just after its `\c` tag.
    ///
    /// Returns `None` when input ends before a verse or heading is found.
    pub fn parse_chapter(&mut self) -> Option<Chapter> {
        let mut chapter = Chapter::default();
        let mut first = true;

        loop {
            let token = self.lex();
            match &token.kind {
                TokenKind::EndOfInput => return None,
                TokenKind::Text { content } if first => {
                    chapter.number = leading_number(content);
                }
                TokenKind::TagOpen { name, .. } if name == "v" => break,
                TokenKind::TagOpen { name, .. } if name == "c" => {
                    self.warn(ParseWarning::EmptyChapter {
                        location: token.location,
                    });
                    return Some(chapter);
                }
                TokenKind::TagOpen { name, .. } if self.config.is_heading(name) => {
                    self.parse_headings(&mut chapter);
                    if self.boundary == Boundary::Chapter {
                        return Some(chapter);
                    }
                    break;
                }
                _ => {}
            }
            first = false;
        }

        while let Some(body) = self.parse_verse() {
            let body = match (&self.empty_verse, body.is_empty()) {
                (Some(placeholder), true) => placeholder.clone(),
                _ => body,
            };
            chapter.push_verse(body);

            match self.boundary {
                Boundary::Chapter => break,
                Boundary::Heading => {
                    self.parse_headings(&mut chapter);
                    if self.boundary == Boundary::Chapter {
                        break;
                    }
                }
                Boundary::Verse | Boundary::Other => {}
            }
        }

        tracing::debug!(
            "Parsed chapter {:?}: {} verses, {} headings",
            chapter.number,
            chapter.verses.len(),
            chapter.heading_info.len()
        );
        Some(chapter)
    }

    /// Parse one verse body, dropping a leading verse number.
    ///
    /// Returns `None` once no verse content remains.
    pub fn parse_verse(&mut self) -> Option<String> {
        let token = self.lex();
        if !matches!(token.kind, TokenKind::NumericText { .. }) {
            self.unlex(token);
        }
        self.parse_body()
    }

    /// Extract headings while the last token read is a heading tag. A heading cut
    /// short by the next boundary is recorded with length 0.
    fn parse_headings(&mut self, chapter: &mut Chapter) {
        loop {
            if let Some(heading) = self.parse_body() {
                chapter.push_heading(&heading);
            }
            if self.boundary != Boundary::Heading {
                break;
            }
        }
    }

    /// Accumulate text until a verse, chapter or heading tag, or the end of input.
    fn parse_body(&mut self) -> Option<String> {
        let mut body = String::new();

        loop {
            let token = self.lex();
            match token.kind {
                TokenKind::Text { content } | TokenKind::NumericText { content, .. } => {
                    body.push_str(&self.substitutions.literals(&content));
                }
                TokenKind::MacroText { key, content } => match self.substitutions.marker(&key) {
                    Some(replacement) => body.push_str(replacement),
                    None => body.push_str(&self.substitutions.literals(&content)),
                },
                TokenKind::TagClose { name, .. } => {
                    // Textual and unknown closing tags contribute nothing.
                    if let Some(replacement) = self.substitutions.closing_tag(&name) {
                        body.push_str(replacement);
                    }
                }
                TokenKind::TagOpen { name, .. } => {
                    if self.boundary != Boundary::Other {
                        return Some(self.substitutions.whitespace(body));
                    }
                    if let Some(replacement) = self.substitutions.tag(&name) {
                        body.push_str(replacement);
                    } else if self.config.is_singular(&name) || self.config.is_double_textual(&name)
                    {
                        continue;
                    } else if self.config.is_singular_greedy(&name) {
                        self.skip_greedy();
                    } else if self.config.is_double_annotation(&name) {
                        self.skip_annotation(&name, token.location);
                    } else {
                        self.warn(ParseWarning::UnsupportedTag {
                            tag: name,
                            location: token.location,
                        });
                    }
                }
                TokenKind::EndOfInput => break,
            }
        }

        if body.is_empty() {
            None
        } else {
            Some(self.substitutions.whitespace(body))
        }
    }

    /// Discard tokens up to, not including, the next greedy tag.
    fn skip_greedy(&mut self) {
        let stop = loop {
            let token = self.lex();
            match &token.kind {
                TokenKind::EndOfInput => break token,
                TokenKind::TagOpen { name, .. } if self.config.is_singular_greedy(name) => {
                    break token
                }
                _ => {}
            }
        };
        self.unlex(stop);
    }

    /// Discard tokens up to and including `\tag*`.
    fn skip_annotation(&mut self, tag: &str, opened: Location) {
        loop {
            let token = self.lex();
            match &token.kind {
                TokenKind::EndOfInput => {
                    self.warn(ParseWarning::UnclosedTag {
                        tag: tag.to_string(),
                        location: opened,
                    });
                    break;
                }
                TokenKind::TagClose { name, .. } if name == tag => break,
                _ => {}
            }
        }
    }

    fn boundary_of(&self, token: &Token) -> Boundary {
        match token.open_tag() {
            Some("v") => Boundary::Verse,
            Some("c") => Boundary::Chapter,
            Some(name) if self.config.is_heading(name) => Boundary::Heading,
            _ => Boundary::Other,
        }
    }

    /// Read the next token, remembering what kind of boundary it is.
    fn lex(&mut self) -> Token {
        let token = self.tokens.next();
        self.boundary = self.boundary_of(&token);
        token
    }

    /// Return the last token read to the stream. `boundary` keeps describing it.
    fn unlex(&mut self, token: Token) {
        self.tokens.push_back(token);
    }

    fn warn(&mut self, warning: ParseWarning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }
}

/// Parse every chapter of `source` with `config`.
pub fn parse_book(source: &str, config: &UsfmConfig) -> Vec<Chapter> {
    Parser::for_source(source, config).parse_book()
}

fn leading_number(text: &str) -> Option<u32> {
    let text = text.trim_start();
    let digits = text
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text, |end| &text[..end]);
    digits.parse().ok()
}
