//! # usfm
//!
//! Extraction of plain chapter and verse text from USFM scripture sources.
//!
//! ```text
//! let config = UsfmConfig::new();
//! let chapters = parse_book(r"\c 1 \v 1 In the beginning", &config);
//! assert_eq!(chapters[0].verses, vec!["In the beginning"]);
//! ```

pub mod usfm;
