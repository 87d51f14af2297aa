use tracing::debug;

use crate::config::BulletPolicy;
use crate::extractor::cleaner::{blank_entities, collapse_whitespace};
use crate::extractor::model::{RejectReason, Segment, Verdict};
use crate::extractor::vocab::{
    ALLOWED_ATTRIBUTE_REGEX, ASSET_REGEX, BULLET_SCRIPT_REGEX, FALLBACK_BLOCK_REGEX,
    JUNK_PATTERNS, RANK_PREFIX_REGEX, RATINGS_REGEX, REVIEW_BOILERPLATE_REGEX,
    SENTENCE_BREAK_REGEX, SIZE_CHARSET_REGEX, SIZE_TOKEN_REGEX, has_letter,
};

const MAX_COLONS: usize = 1;
const ALLOWED_ATTRIBUTE_MAX_LEN: usize = 120;
const SIZE_LIST_MAX_TOKENS: usize = 10;
const SIZE_TOKEN_MAX_LEN: usize = 4;
const SYMBOLIC_MAX_LEN: usize = 8;
const OVERSIZED_LEN: usize = 300;
const SENTENCE_MIN_LEN: usize = 20;
const FALLBACK_MIN_LEN: usize = 12;
const FALLBACK_MAX_LEN: usize = 180;
const TERMINAL_PERIOD_MIN_LEN: usize = 40;

/// Result of judging one segment. Oversized segments are not rejected
/// outright; their sentences are judged by the caller instead.
enum Judgement {
    Keep(String),
    Sentences(Vec<String>),
    Drop(RejectReason),
}

/// Ordered, case-insensitively unique bullets with a hard cap.
struct BulletSet {
    items: Vec<String>,
    seen: Vec<String>,
    cap: usize,
}

impl BulletSet {
    fn new(cap: usize) -> Self {
        Self {
            items: Vec::new(),
            seen: Vec::new(),
            cap,
        }
    }

    fn is_full(&self) -> bool {
        self.items.len() >= self.cap
    }

    fn push(&mut self, bullet: String) -> bool {
        let bullet = terminate_sentence(&bullet);
        let key = bullet.to_lowercase();
        if self.seen.contains(&key) {
            debug!(reason = %RejectReason::DuplicateBullet, "bullet rejected");
            return false;
        }
        self.seen.push(key);
        self.items.push(bullet);
        true
    }
}

pub fn classify_bullets(segments: &[Segment], policy: &BulletPolicy) -> Vec<String> {
    let mut accepted = strict_pass(segments, policy.max_bullets);

    if accepted.items.is_empty() {
        debug!(segments = segments.len(), "strict bullet pass empty, relaxing");
        accepted = relaxed_pass(segments, policy.fallback_target());
    }

    accepted.items.truncate(policy.max_bullets);
    accepted.items
}

/// Verdict for a single segment under the strict rules, without splitting.
pub fn classify_segment(text: &str) -> Verdict {
    match judge(text) {
        Judgement::Keep(bullet) => Verdict::Accept(bullet),
        Judgement::Sentences(_) => Verdict::Reject(RejectReason::Oversized),
        Judgement::Drop(reason) => Verdict::Reject(reason),
    }
}

fn strict_pass(segments: &[Segment], cap: usize) -> BulletSet {
    let mut accepted = BulletSet::new(cap);

    for segment in segments {
        if accepted.is_full() {
            break;
        }
        match judge(&segment.text) {
            Judgement::Keep(bullet) => {
                accepted.push(bullet);
            }
            Judgement::Sentences(sentences) => {
                for sentence in sentences {
                    if accepted.is_full() {
                        break;
                    }
                    accepted.push(sentence);
                }
            }
            Judgement::Drop(reason) => {
                debug!(index = segment.index, reason = %reason, "bullet rejected");
            }
        }
    }

    accepted
}

fn relaxed_pass(segments: &[Segment], target: usize) -> BulletSet {
    let mut accepted = BulletSet::new(target);

    for segment in segments {
        if accepted.is_full() {
            break;
        }
        let text = collapse_whitespace(&blank_entities(&segment.text));
        let len = text.chars().count();
        if (FALLBACK_MIN_LEN..=FALLBACK_MAX_LEN).contains(&len)
            && has_letter(&text)
            && !FALLBACK_BLOCK_REGEX.is_match(&text)
        {
            accepted.push(text);
        }
    }

    accepted
}

fn judge(raw: &str) -> Judgement {
    let part = collapse_whitespace(&blank_entities(raw));
    if part.is_empty() {
        return Judgement::Drop(RejectReason::Empty);
    }
    if RATINGS_REGEX.is_match(&part) {
        return Judgement::Drop(RejectReason::Ratings);
    }
    if BULLET_SCRIPT_REGEX.is_match(&part) {
        return Judgement::Drop(RejectReason::Script);
    }
    if ASSET_REGEX.is_match(&part) {
        return Judgement::Drop(RejectReason::Asset);
    }

    let len = part.chars().count();
    if part.matches(':').count() > MAX_COLONS {
        return Judgement::Drop(RejectReason::ColonDense);
    }
    if is_junk(&part, len) {
        return Judgement::Drop(RejectReason::Junk);
    }
    if is_size_list(&part) {
        return Judgement::Drop(RejectReason::SizeList);
    }
    if RANK_PREFIX_REGEX.is_match(&part) {
        return Judgement::Drop(RejectReason::RankPrefix);
    }
    if len < SYMBOLIC_MAX_LEN && !has_letter(&part) {
        return Judgement::Drop(RejectReason::NoLetters);
    }
    if REVIEW_BOILERPLATE_REGEX.is_match(&part) {
        return Judgement::Drop(RejectReason::Boilerplate);
    }

    if !has_letter(&part) {
        return Judgement::Drop(RejectReason::NoLetters);
    }
    if part.split_whitespace().count() < 2 {
        return Judgement::Drop(RejectReason::SingleToken);
    }

    if len > OVERSIZED_LEN {
        let sentences = SENTENCE_BREAK_REGEX
            .split(&part)
            .map(str::trim)
            .filter(|s| s.chars().count() >= SENTENCE_MIN_LEN && has_letter(s))
            .map(str::to_string)
            .collect();
        return Judgement::Sentences(sentences);
    }

    let bullet = part
        .trim_start_matches(['-', '•'])
        .trim_end_matches(|c: char| c.is_whitespace() || c == '-' || c == '|')
        .trim();
    if bullet.is_empty() {
        return Judgement::Drop(RejectReason::Empty);
    }
    Judgement::Keep(bullet.to_string())
}

/// A junk match is forgiven for short attribute lines such as
/// `Material: 100% cotton`.
fn is_junk(part: &str, len: usize) -> bool {
    if !JUNK_PATTERNS.iter().any(|re| re.is_match(part)) {
        return false;
    }
    !(ALLOWED_ATTRIBUTE_REGEX.is_match(part) && len < ALLOWED_ATTRIBUTE_MAX_LEN)
}

fn is_size_list(part: &str) -> bool {
    if !SIZE_TOKEN_REGEX.is_match(part) || !SIZE_CHARSET_REGEX.is_match(part) {
        return false;
    }
    let tokens: Vec<&str> = part.split_whitespace().collect();
    tokens.len() <= SIZE_LIST_MAX_TOKENS
        && tokens.iter().all(|token| {
            token.len() <= SIZE_TOKEN_MAX_LEN && token.chars().all(|c| c.is_ascii_alphanumeric())
        })
}

fn terminate_sentence(bullet: &str) -> String {
    let bullet = bullet.trim();
    let ends_with_letter = bullet.chars().last().is_some_and(|c| c.is_ascii_alphabetic());
    if ends_with_letter && bullet.chars().count() >= TERMINAL_PERIOD_MIN_LEN {
        format!("{bullet}.")
    } else {
        bullet.to_string()
    }
}
