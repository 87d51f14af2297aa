use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw text selected from a product page, one list per field, each list in
/// priority order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingCandidates {
    #[serde(default)]
    pub titles: Vec<String>,
    /// Inline script bodies searched for an embedded title when no title
    /// candidate survives.
    #[serde(default)]
    pub scripts: Vec<String>,
    /// Raw bullet blobs; the first is primary, later entries are fallbacks.
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub descriptions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedListing {
    pub title: Option<String>,
    pub bullets: Vec<String>,
    pub description: Option<String>,
}

impl ExtractedListing {
    /// True when nothing usable was found; callers treat this as not-found.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.bullets.is_empty() && self.description.is_none()
    }
}

/// A piece of a raw blob produced by the splitter. `index` is its position
/// in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept(String),
    Reject(RejectReason),
}

impl Verdict {
    pub fn accepted(self) -> Option<String> {
        match self {
            Verdict::Accept(text) => Some(text),
            Verdict::Reject(_) => None,
        }
    }

    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Empty,
    Script,
    DeadPage,
    SpecSheet,
    Duplicated,
    Markup,
    TooShort,
    NumericDump,
    SpecDense,
    Ratings,
    Asset,
    ColonDense,
    Junk,
    SizeList,
    RankPrefix,
    Boilerplate,
    NoLetters,
    SingleToken,
    Oversized,
    DuplicateBullet,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::Empty => "empty",
            RejectReason::Script => "script",
            RejectReason::DeadPage => "dead_page",
            RejectReason::SpecSheet => "spec_sheet",
            RejectReason::Duplicated => "duplicated_halves",
            RejectReason::Markup => "markup",
            RejectReason::TooShort => "too_short",
            RejectReason::NumericDump => "numeric_dump",
            RejectReason::SpecDense => "spec_dense",
            RejectReason::Ratings => "ratings",
            RejectReason::Asset => "asset",
            RejectReason::ColonDense => "colon_dense",
            RejectReason::Junk => "junk",
            RejectReason::SizeList => "size_list",
            RejectReason::RankPrefix => "rank_prefix",
            RejectReason::Boilerplate => "boilerplate",
            RejectReason::NoLetters => "no_letters",
            RejectReason::SingleToken => "single_token",
            RejectReason::Oversized => "oversized",
            RejectReason::DuplicateBullet => "duplicate",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
