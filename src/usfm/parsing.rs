//! Parser
//!
//!     Chapter and verse extraction over a token stream. See [parser](parser) for the
//!     state machine and [chapter](chapter) for the record it produces.
//!
//!     A book is a run of chapters, each introduced by `\c`. Anything before the first
//!     chapter tag (identification, introductions, titles) is skipped. Within a chapter,
//!     each `\v` starts a verse and each heading tag starts a heading; headings are kept
//!     apart from the verse text together with the verse count they follow.

pub mod chapter;
pub mod parser;

pub use chapter::{Chapter, HeadingSpan};
pub use parser::{parse_book, Parser};
