//! Substitution engine
//!
//!     Two rewrite rules turn accepted tokens into output text:
//!
//!         Macro substitution:   a tag name (open), `name*` (close) or an in-text marker key
//!                               with an entry in the macro table is replaced by that entry.
//!         Literal substitution: every `ReplaceLiteral` needle in a run of text is replaced.
//!
//!     Literal substitution runs in two full passes. The first pass swaps every needle for a
//!     placeholder unique to its rule, the second swaps placeholders for replacements. A
//!     single pass would let one rule's replacement be matched again by a later rule.
//!     Placeholders are built from private-use characters that occur in neither the text
//!     nor any rule, so they can be neither matched by a needle nor confused with input.
//!
//!     Whitespace handling also lives here: unless `SignificantWhitespace` is set, every
//!     run of two or more spaces in a finished unit collapses to one space.

use crate::usfm::config::{LiteralRule, UsfmConfig};
use once_cell::sync::Lazy;
use regex::Regex;

static REPEATED_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(" {2,}").unwrap());

// Supplementary Private Use Area-A and -B.
const PRIVATE_USE_START: u32 = 0xF0000;
const PRIVATE_USE_END: u32 = 0x10FFFD;
// Open mark, ten digit marks, close mark.
const PLACEHOLDER_WIDTH: u32 = 12;

/// Rewrite rules bound to one configuration.
#[derive(Debug, Clone, Copy)]
pub struct Substitutions<'c> {
    config: &'c UsfmConfig,
}

impl<'c> Substitutions<'c> {
    pub fn new(config: &'c UsfmConfig) -> Self {
        Self { config }
    }

    /// Replacement for an opening tag.
    pub fn tag(&self, name: &str) -> Option<&'c str> {
        self.config.macro_replacement(name)
    }

    /// Replacement for a closing tag, looked up as `name*`.
    pub fn closing_tag(&self, name: &str) -> Option<&'c str> {
        self.config.macro_replacement(&format!("{}*", name))
    }

    /// Replacement for an in-text marker key.
    pub fn marker(&self, key: &str) -> Option<&'c str> {
        self.config.macro_replacement(key)
    }

    /// Apply the literal table to a run of text.
    pub fn literals(&self, text: &str) -> String {
        substitute_literals(text, self.config.literal_rules())
    }

    /// Apply whitespace handling to a finished verse or heading.
    pub fn whitespace(&self, text: String) -> String {
        handle_whitespace(text, self.config.significant_whitespace())
    }
}

/// Replace every rule's needle with its replacement, without letting any replacement
/// be matched by another rule.
pub fn substitute_literals(text: &str, rules: &[LiteralRule]) -> String {
    if rules.is_empty() {
        return text.to_string();
    }

    let base = placeholder_base(text, rules);
    let placeholders: Vec<String> = (0..rules.len())
        .map(|index| placeholder(base, index))
        .collect();

    let mut out = text.to_string();
    for (rule, placeholder) in rules.iter().zip(&placeholders) {
        out = out.replace(&rule.needle, placeholder);
    }
    for (rule, placeholder) in rules.iter().zip(&placeholders) {
        out = out.replace(placeholder.as_str(), &rule.replacement);
    }
    out
}

/// Collapse runs of spaces unless whitespace is significant. Tabs and line breaks are
/// left alone.
pub fn handle_whitespace(text: String, significant: bool) -> String {
    if significant {
        return text;
    }
    REPEATED_SPACES.replace_all(&text, " ").into_owned()
}

/// First code point of a placeholder window none of whose characters appear in the text
/// or the rules.
fn placeholder_base(text: &str, rules: &[LiteralRule]) -> u32 {
    let in_use: Vec<u32> = text
        .chars()
        .chain(
            rules
                .iter()
                .flat_map(|rule| rule.needle.chars().chain(rule.replacement.chars())),
        )
        .map(u32::from)
        .filter(|&c| c >= PRIVATE_USE_START)
        .collect();

    let mut base = PRIVATE_USE_START;
    while base + PLACEHOLDER_WIDTH <= PRIVATE_USE_END {
        if !in_use
            .iter()
            .any(|&c| (base..base + PLACEHOLDER_WIDTH).contains(&c))
        {
            return base;
        }
        base += PLACEHOLDER_WIDTH;
    }
    // Unreachable without ~10k distinct private-use characters in the input.
    PRIVATE_USE_START
}

fn placeholder(base: u32, index: usize) -> String {
    let mark = |offset: u32| char::from_u32(base + offset).unwrap_or(char::REPLACEMENT_CHARACTER);
    let mut out = String::new();
    out.push(mark(0));
    for digit in index.to_string().bytes() {
        out.push(mark(1 + u32::from(digit - b'0')));
    }
    out.push(mark(PLACEHOLDER_WIDTH - 1));
    out
}
