//! Main module for USFM text extraction
//!
//!     Source text flows through three stages:
//!
//!         lexing        USFM text to tokens
//!         parsing       tokens to chapters of verses and headings
//!         substitution  tag and literal rewriting applied while parsing
//!
//!     All three are driven by a [`UsfmConfig`], built from the defaults and any number of
//!     configuration sources before parsing starts.

pub mod config;
pub mod diagnostics;
pub mod lexing;
pub mod parsing;
pub mod substitution;
pub mod token;

pub use config::{ConfigReport, UsfmConfig};
pub use diagnostics::{ConfigError, ConfigWarning, ParseWarning};
pub use parsing::{parse_book, Chapter, HeadingSpan, Parser};
