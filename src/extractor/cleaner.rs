use std::sync::LazyLock;

use regex::Regex;

static BREAK_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?(?:br|p|li)\b[^>]*>").unwrap());

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const ENTITIES: [(&str, &str); 4] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&quot;", "\""),
    ("&#39;", "'"),
];

/// Collapse a raw fragment to a single trimmed line.
///
/// Line, paragraph and list-item tags become breaks before whitespace is
/// collapsed so adjacent elements never fuse into one word. Returns `None`
/// when nothing but whitespace is left.
pub fn normalize(text: &str) -> Option<String> {
    let text = BREAK_TAG_REGEX.replace_all(text, "\n");
    let text = decode_entities(&text);
    let collapsed = collapse_whitespace(&text);
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Decode the known entities until none are left.
///
/// Escaped entities decode all the way, so `&amp;quot;` becomes `"` and
/// `&amp;nbsp;` becomes a space. Every replacement shortens the text, so the
/// loop terminates.
pub fn decode_entities(text: &str) -> String {
    let mut out = text.to_string();
    loop {
        let mut changed = false;
        for (entity, replacement) in ENTITIES {
            if out.contains(entity) {
                out = out.replace(entity, replacement);
                changed = true;
            }
        }
        if !changed {
            return out;
        }
    }
}

/// Entities become plain spaces. Bullet fragments use this so that a stray
/// `&amp;` never glues two words together.
pub fn blank_entities(text: &str) -> String {
    let mut out = text.to_string();
    for (entity, _) in ENTITIES {
        if out.contains(entity) {
            out = out.replace(entity, " ");
        }
    }
    out
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}
