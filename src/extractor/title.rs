use std::sync::LazyLock;

use regex::Regex;

use crate::extractor::cleaner::normalize;

static SCRIPT_TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)"title"\s*:\s*"([^"]{10,300})""#).unwrap());

static SCRIPT_PRODUCT_TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)"productTitle"\s*:\s*"([^"]{10,300})""#).unwrap());

/// First non-empty title in priority order, then a title embedded in page
/// scripts as a last resort.
pub fn pick_title<S: AsRef<str>>(candidates: &[S], scripts: &[S]) -> Option<String> {
    candidates
        .iter()
        .find_map(|candidate| normalize(candidate.as_ref()))
        .or_else(|| scripts.iter().find_map(|script| title_from_script(script.as_ref())))
}

/// `productTitle` wins over a generic `title` key in the same script.
pub fn title_from_script(script: &str) -> Option<String> {
    let product_title = SCRIPT_PRODUCT_TITLE_REGEX
        .captures(script)
        .and_then(|caps| normalize(&caps[1]));
    product_title.or_else(|| {
        SCRIPT_TITLE_REGEX
            .captures(script)
            .and_then(|caps| normalize(&caps[1]))
    })
}
