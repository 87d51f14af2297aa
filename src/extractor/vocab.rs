//! Fixed vocabularies and signatures shared by the classifiers.
//!
//! Everything here is read-only process-wide data. Phrase lists are plain
//! slices; anything that needs word boundaries or alternation is compiled
//! once into a `LazyLock<Regex>`.

use std::sync::LazyLock;

use regex::Regex;

/// Product-attribute vocabulary used by the spec-sheet heuristics. Matching is
/// by lowercase substring, one hit per keyword.
pub const SPEC_KEYWORDS: &[&str] = &[
    "asin",
    "manufacturer",
    "item model",
    "model number",
    "product dimensions",
    "item dimensions",
    "included components",
    "country of origin",
    "item weight",
    "net quantity",
    "part number",
    "material",
    "fabric",
    "care instructions",
    "size",
    "colour",
    "color",
    "wash",
    "battery",
    "ram",
    "storage",
    "processor",
    "voltage",
    "watt",
    "capacity",
    "power",
    "waterproof",
    "warranty",
    "ean",
    "upc",
    "sku",
    "brand",
    "importer",
    "packer",
];

pub const DEAD_PAGE_PHRASES: &[&str] = &[
    "page not found",
    "the web address you entered is not a functioning page",
    "looking for something",
];

pub fn spec_keyword_hits(lower: &str) -> usize {
    SPEC_KEYWORDS
        .iter()
        .filter(|keyword| lower.contains(*keyword))
        .count()
}

pub fn contains_dead_page_phrase(lower: &str) -> bool {
    DEAD_PAGE_PHRASES
        .iter()
        .any(|phrase| lower.contains(phrase))
}

// Description-side signatures.

pub static SCRIPT_SIGNATURE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)p\.when\(|a\.on\(|window\.ue\b|window\.csa\b|csa\(|execute\(function|\bfunction\s*\(|var\s+\w+\s*=|</?script\b",
    )
    .unwrap()
});

pub static RESIDUAL_MARKUP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?script\b|</?div\b|</?table\b|<meta\b|</?style\b|<img\b").unwrap()
});

pub static SENTENCE_SHAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z][.?!]\s+[A-Z0-9]").unwrap());

// Bullet-side signatures.

pub static RATINGS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bout of 5 stars\b|\bverified purchase\b|\brated\b").unwrap()
});

pub static BULLET_SCRIPT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)function\(|window\.ue\b|p\.when\(|dpAcrHasRegisteredArcLinkClickAction|ue\.count\(",
    )
    .unwrap()
});

pub static ASSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)amazon-avatars|m\.media-amazon|img src=").unwrap());

pub static JUNK_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(page not found|looking for something|to view this video|download flash player)\b",
        r"(?i)\b(customer reviews|out of 5 stars|ratings|verified purchase|helpful report)\b",
        r"(?i)\b(best sellers rank|best sellers|see top 100|rank in)\b",
        r"(?i)\b(asin|item model|manufacturer|importer|packer|country of origin|item weight|item dimensions|net quantity)\b",
        r"(?i)<script\b|</script>|window\.ue\b|p\.when\(|dpAcrHasRegisteredArcLinkClickAction|ue\.count\(",
        r"(?i)\b(size|colour|color|fabric|material|sleeve|pattern|department)\b[:\s]",
        r"(?i)https?://\S+",
        r"(?i)img src=|amazon-avatars|m\.media-amazon",
        r"(?i)\b(reviews?|reviewed in)\b",
        r"^\s*[\d.,%\-#]+\s*$",
        r"^[\W_]+$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Short attribute lines matching this survive a junk match.
pub static ALLOWED_ATTRIBUTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(sleeve|pattern|fabric|fabric type|colour|color|size|material|fit|style)\b")
        .unwrap()
});

pub static SIZE_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(xs|s|m|l|xl|xxl|2xl|3xl|4xl|size|sizes)\b|\b(xs|s|m|l|xl|xxl)\b",
    )
    .unwrap()
});

pub static SIZE_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\s\-,]+$").unwrap());

pub static RANK_PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(best sellers rank|customer reviews|customer rating|ratings|best sellers)\b",
    )
    .unwrap()
});

pub static REVIEW_BOILERPLATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(reviewed in|read more|helpful report|verified purchase)\b").unwrap()
});

pub static SENTENCE_BREAK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.؛;]\s+").unwrap());

/// The relaxed pass still refuses anything mentioning these.
pub static FALLBACK_BLOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)review|rating|best sellers|asin|item model").unwrap()
});

pub fn has_letter(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic())
}
