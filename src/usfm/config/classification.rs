//! Tag categories and the membership rule
//!
//!     Every category is a pair of configuration sets: a plain set, matched exactly, and a
//!     `...WithNumbers` set of prefixes that match when followed by a run of digits. So
//!     with `SingularTagsWithNumbers: q` the tags `q1` and `q22` are singular, `qa` is not,
//!     and `q` itself only if `SingularTags` also lists it.

/// The tag categories the parser asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagCategory {
    /// Markers whose following text is ordinary verse text (`\p`, `\q1`).
    Singular,
    /// Markers whose following text is discarded up to the next greedy marker (`\mt`, `\s`).
    SingularGreedy,
    /// Paired character styles whose content is kept (`\nd ...\nd*`).
    DoubleTextual,
    /// Paired notes whose whole span is discarded (`\f ...\f*`).
    DoubleAnnotation,
    /// Section headings, extracted into the chapter's heading list.
    Heading,
}

impl TagCategory {
    /// Name of the plain set in the configuration.
    pub fn set_name(self) -> &'static str {
        match self {
            TagCategory::Singular => "SingularTags",
            TagCategory::SingularGreedy => "SingularGreedyTags",
            TagCategory::DoubleTextual => "DoubleTextualTags",
            TagCategory::DoubleAnnotation => "DoubleAnnotationTags",
            TagCategory::Heading => "HeadingTags",
        }
    }
}

/// Suffix naming the prefix-plus-digits companion of a set.
pub const WITH_NUMBERS: &str = "WithNumbers";

/// True if `tag` equals a member of `plain`, or is a member of `numbered` followed by
/// one or more decimal digits.
pub fn matches(tag: &str, plain: &[String], numbered: &[String]) -> bool {
    plain.iter().any(|member| member == tag)
        || numbered.iter().any(|prefix| {
            tag.strip_prefix(prefix.as_str())
                .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
        })
}
