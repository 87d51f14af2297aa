use std::sync::LazyLock;

use regex::Regex;

use crate::extractor::model::Segment;

static BR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</?br\s*/?>").unwrap());

static IMG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<img[^>]*>").unwrap());

static LIST_ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</li>|<li[^>]*>").unwrap());

static HORIZONTAL_SPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

static DELIMITER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\n|[•·‣◦∙⁃;—–]|</li>|<li>|</p>|<p>|<div class="a-section">|</div>| - "#,
    )
    .unwrap()
});

/// Break a raw bullet blob into trimmed, non-empty segments in source order.
pub fn split(raw: &str) -> Vec<Segment> {
    let text = raw.replace('\r', " ");
    let text = BR_REGEX.replace_all(&text, "\n");
    let text = IMG_REGEX.replace_all(&text, " ");
    let text = LIST_ITEM_REGEX.replace_all(&text, "\n");
    let text = HORIZONTAL_SPACE_REGEX.replace_all(&text, " ");

    DELIMITER_REGEX
        .split(&text)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .enumerate()
        .map(|(index, piece)| Segment {
            index,
            text: piece.to_string(),
        })
        .collect()
}
