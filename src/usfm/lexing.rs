//! Lexer
//!
//!     This module turns USFM source text into the token stream the parser consumes.
//!
//! The Lexing Pipeline
//!
//!     1. Core tokenization using the logos lexer. See [base_tokenization](base_tokenization).
//!        Text is cut at every backslash, `~`, `/` and line break.
//!
//!     2. Token assembly. See [stream](stream). Text pieces are merged back together (line
//!        breaks fold into spaces), in-text markers become macro tokens and the number after
//!        a `\v` tag becomes a numeric token.
//!
//!     3. Pushback. The parser reads through a [`TokenStream`], which holds at most one token
//!        returned by the parser for re-inspection.
//!
//!     The parser only depends on the [`TokenSource`] trait, so hosts with their own tokenizer
//!     (or tests with prepared token lists) can feed it directly.

pub mod base_tokenization;
pub mod stream;

pub use base_tokenization::RawToken;
pub use stream::{TokenList, TokenSource, TokenStream, UsfmLexer};
