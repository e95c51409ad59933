//! The chapter record produced by the parser

use serde::Serialize;

/// Where a heading attaches and how long it is.
///
/// `verse_index` is the number of verses preceding the heading, so `0` places it before
/// the first verse. `len` is the heading's byte length within [`Chapter::all_headings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeadingSpan {
    pub verse_index: usize,
    pub len: usize,
}

/// Text extracted from one chapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Chapter {
    /// The `\c` argument, when the chapter started with one.
    pub number: Option<u32>,
    pub verses: Vec<String>,
    /// All verse bodies concatenated in order.
    pub all_verses: String,
    pub heading_info: Vec<HeadingSpan>,
    /// All heading texts concatenated in order.
    pub all_headings: String,
}

impl Chapter {
    pub fn push_verse(&mut self, body: String) {
        self.all_verses.push_str(&body);
        self.verses.push(body);
    }

    /// Attach a heading after the verses parsed so far.
    pub fn push_heading(&mut self, heading: &str) {
        self.heading_info.push(HeadingSpan {
            verse_index: self.verses.len(),
            len: heading.len(),
        });
        self.all_headings.push_str(heading);
    }

    /// Headings with the verse index they attach at.
    pub fn headings(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        let mut offset = 0;
        self.heading_info.iter().map(move |span| {
            let text = &self.all_headings[offset..offset + span.len];
            offset += span.len;
            (span.verse_index, text)
        })
    }

    /// Heading info flattened to `[verse_index, len, verse_index, len, ...]`.
    pub fn heading_pairs(&self) -> Vec<usize> {
        self.heading_info
            .iter()
            .flat_map(|span| [span.verse_index, span.len])
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty() && self.heading_info.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concatenations_follow_pushes() {
        let mut chapter = Chapter::default();
        chapter.push_heading("Creation");
        chapter.push_verse("In the beginning.".to_string());
        chapter.push_verse("And the earth.".to_string());
        chapter.push_heading("Rest");

        assert_eq!(chapter.all_verses, "In the beginning.And the earth.");
        assert_eq!(chapter.all_headings, "CreationRest");
        assert_eq!(chapter.heading_pairs(), vec![0, 8, 2, 4]);
        assert_eq!(
            chapter.headings().collect::<Vec<_>>(),
            vec![(0, "Creation"), (2, "Rest")]
        );
    }

    #[test]
    fn test_heading_lengths_are_bytes() {
        let mut chapter = Chapter::default();
        chapter.push_heading("Genèse");
        chapter.push_heading("Ā");
        assert_eq!(chapter.heading_info[0].len, 7);
        assert_eq!(
            chapter.headings().map(|(_, h)| h).collect::<Vec<_>>(),
            vec!["Genèse", "Ā"]
        );
    }

    #[test]
    fn test_empty() {
        assert!(Chapter::default().is_empty());
    }
}
