//! Configuration interpreter
//!
//!     The parser's behaviour is driven by configuration lines of the form `Param: Value`.
//!     Built-in defaults ([`DEFAULT_CONFIG`]) are applied first; external sources are layered
//!     on top and win per key.
//!
//! Replacement lines
//!
//!     `Replace`, `ReplaceTag` and `ReplaceLiteral` take a value `/needle/replacement/`
//!     where the first character is the delimiter for the rest of the value, so
//!     `|a/b|c|` is as good as `/x/y/`. The needle is literal; the replacement goes through
//!     the [escape decoder](escape). `ReplaceLiteral` appends to the ordered literal table,
//!     the other two upsert into the macro table (tag names, `name*` for closing tags, and
//!     in-text marker keys).
//!
//! Category lines
//!
//!     Any other parameter is stored as its whitespace-separated members, replacing any
//!     previous value. See [classification] for how the tag sets are matched.
//!
//!     Malformed lines are reported and skipped; the rest of the source still applies.

pub mod classification;
pub mod escape;
pub mod loader;

pub use classification::TagCategory;

use crate::usfm::diagnostics::{ConfigError, ConfigWarning};
use classification::WITH_NUMBERS;
use std::collections::HashMap;
use std::path::Path;

/// Configuration applied to every new [`UsfmConfig`].
pub const DEFAULT_CONFIG: &[&str] = &[
    "SingularTags: pmo pm pmc pmr mi nb cls pc pr qr qc pb b m p z li qm q pi ph",
    "SingularTagsWithNumbers: li qm q pi ph",
    "SingularGreedyTags: cl cp cd qa sr mr  ms mte mt s sr  r  d  sp is v c",
    "SingularGreedyTagsWithNumbers: ms mte mt s is",
    "DoubleTextualTags: qs qac add dc ndx nd ord pn pro qt sig sls wg wh tl em bd it bdit no sc k w",
    "DoubleTextualTagsWithNumbers: ",
    "DoubleAnnotationTags: ca va vp fe bk xdc fdc fm fig f x rq xot xnt iqt",
    "DoubleAnnotationTagsWithNumbers: ",
    "HeadingTags: s s1 s2",
    "SignificantWhitespace: false",
    r"Replace: /--newline--/\n/",
    r"Replace: /wj/\01/",
    r"Replace: /wj*/\01/",
    r"Replace: /--nbsp--/\ua0/",
];

/// One `ReplaceLiteral` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralRule {
    pub needle: String,
    pub replacement: String,
}

/// Warnings collected while applying configuration lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigReport {
    pub warnings: Vec<ConfigWarning>,
}

impl ConfigReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Classification sets and replacement tables for one extraction.
///
/// Built up front and only read while parsing; the parser borrows it immutably, so
/// reconfiguring means building a new value between parses.
#[derive(Debug, Clone)]
pub struct UsfmConfig {
    categories: HashMap<String, Vec<String>>,
    macros: HashMap<String, String>,
    literals: Vec<LiteralRule>,
}

impl UsfmConfig {
    /// The built-in defaults.
    pub fn new() -> Self {
        let mut config = Self::empty();
        let report = config.apply_lines(DEFAULT_CONFIG.iter().copied());
        debug_assert!(report.is_clean(), "default configuration is malformed");
        config
    }

    /// A configuration with no categories and no replacements.
    pub fn empty() -> Self {
        Self {
            categories: HashMap::new(),
            macros: HashMap::new(),
            literals: Vec::new(),
        }
    }

    /// Defaults overridden by the entries of `source`.
    pub fn from_source(source: &str) -> (Self, ConfigReport) {
        let mut config = Self::new();
        let report = config.apply_source(source);
        (config, report)
    }

    /// Apply the entries of a line-oriented source (comments, continuations).
    pub fn apply_source(&mut self, source: &str) -> ConfigReport {
        let entries = loader::logical_entries(source);
        self.apply_lines(entries.iter().map(String::as_str))
    }

    /// Apply a configuration file on top of the current values.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<ConfigReport, ConfigError> {
        let source = loader::read_source(&path)?;
        tracing::debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(self.apply_source(&source))
    }

    /// Apply already-split logical entries in order.
    pub fn apply_lines<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) -> ConfigReport {
        let mut report = ConfigReport::default();
        for line in lines {
            self.interpret_line(line, &mut report.warnings);
        }
        report
    }

    /// Interpret a single `Param: Value` entry.
    pub fn interpret_line(&mut self, entry: &str, warnings: &mut Vec<ConfigWarning>) {
        if entry.trim().is_empty() {
            return;
        }

        let Some((param, value)) = entry.split_once(':') else {
            report(
                warnings,
                ConfigWarning::MissingDelimiter {
                    entry: entry.to_string(),
                },
            );
            return;
        };
        let param = param.trim();
        let value = value.trim();

        match param {
            "Replace" | "ReplaceTag" | "ReplaceLiteral" => {
                let Some((needle, raw_replacement)) = split_replacement(value) else {
                    report(
                        warnings,
                        ConfigWarning::MalformedReplacement {
                            entry: entry.to_string(),
                        },
                    );
                    return;
                };
                let replacement = escape::decode_reporting(raw_replacement, warnings);

                if param == "ReplaceLiteral" {
                    if needle.is_empty() {
                        report(
                            warnings,
                            ConfigWarning::EmptyNeedle {
                                entry: entry.to_string(),
                            },
                        );
                        return;
                    }
                    self.literals.push(LiteralRule {
                        needle: needle.to_string(),
                        replacement,
                    });
                } else {
                    self.macros.insert(needle.to_string(), replacement);
                }
            }
            _ => {
                let members = value.split_whitespace().map(str::to_string).collect();
                self.categories.insert(param.to_string(), members);
            }
        }
    }

    /// Members stored under `name`, empty if the parameter was never set.
    pub fn category(&self, name: &str) -> &[String] {
        self.categories.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Membership of `tag` in the set `set_name` or its `...WithNumbers` companion.
    pub fn classify(&self, tag: &str, set_name: &str) -> bool {
        let numbered = format!("{}{}", set_name, WITH_NUMBERS);
        classification::matches(tag, self.category(set_name), self.category(&numbered))
    }

    pub fn is_in(&self, tag: &str, category: TagCategory) -> bool {
        self.classify(tag, category.set_name())
    }

    pub fn is_singular(&self, tag: &str) -> bool {
        self.is_in(tag, TagCategory::Singular)
    }

    pub fn is_singular_greedy(&self, tag: &str) -> bool {
        self.is_in(tag, TagCategory::SingularGreedy)
    }

    pub fn is_double_textual(&self, tag: &str) -> bool {
        self.is_in(tag, TagCategory::DoubleTextual)
    }

    pub fn is_double_annotation(&self, tag: &str) -> bool {
        self.is_in(tag, TagCategory::DoubleAnnotation)
    }

    pub fn is_heading(&self, tag: &str) -> bool {
        self.is_in(tag, TagCategory::Heading)
    }

    /// Replacement registered for a tag name, `name*` closing key or marker key.
    pub fn macro_replacement(&self, key: &str) -> Option<&str> {
        self.macros.get(key).map(String::as_str)
    }

    pub fn literal_rules(&self) -> &[LiteralRule] {
        &self.literals
    }

    /// `SignificantWhitespace` is a single member reading `true`, `yes` or `1`.
    pub fn significant_whitespace(&self) -> bool {
        match self.category("SignificantWhitespace") {
            [flag] => ["true", "yes", "1"]
                .iter()
                .any(|accepted| flag.eq_ignore_ascii_case(accepted)),
            _ => false,
        }
    }
}

impl Default for UsfmConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `/needle/replacement/` on its leading delimiter. The closing delimiter is
/// required; anything after it is ignored.
fn split_replacement(value: &str) -> Option<(&str, &str)> {
    let mut chars = value.chars();
    let delimiter = chars.next()?;
    let mut fields = chars.as_str().split(delimiter);
    let needle = fields.next()?;
    let replacement = fields.next()?;
    fields.next()?;
    Some((needle, replacement))
}

fn report(warnings: &mut Vec<ConfigWarning>, warning: ConfigWarning) {
    tracing::warn!("{}", warning);
    warnings.push(warning);
}
