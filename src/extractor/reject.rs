use tracing::debug;

use crate::config::DescriptionPolicy;
use crate::extractor::cleaner::normalize;
use crate::extractor::model::{RejectReason, Verdict};
use crate::extractor::vocab::{
    RESIDUAL_MARKUP_REGEX, SCRIPT_SIGNATURE_REGEX, SENTENCE_SHAPE_REGEX,
    contains_dead_page_phrase, spec_keyword_hits,
};

const MIN_DESCRIPTION_LENGTH: usize = 20;
const SPEC_SHEET_THRESHOLD: usize = 3;
const SHORT_SPEC_LENGTH: usize = 200;
const LABEL_MAX_WIDTH: usize = 40;
const HALVES_MIN_MIDPOINT: usize = 50;
const HALVES_MAX_OVERLAP: f64 = 0.5;

/// A normalized description candidate with the values most rules share.
pub struct Candidate {
    pub text: String,
    pub lower: String,
    pub len: usize,
}

impl Candidate {
    fn new(text: String) -> Self {
        let lower = text.to_lowercase();
        let len = text.chars().count();
        Self { text, lower, len }
    }
}

pub type DescriptionRule = fn(&Candidate, &DescriptionPolicy) -> Option<RejectReason>;

/// Evaluated in order; the first rejection wins.
pub const DESCRIPTION_RULES: &[DescriptionRule] = &[
    reject_script,
    reject_dead_page,
    reject_spec_sheet,
    reject_duplicated_halves,
    reject_markup,
    reject_too_short,
    reject_numeric_dump,
    reject_spec_dense,
];

pub fn classify_description(raw: &str, policy: &DescriptionPolicy) -> Verdict {
    let Some(text) = normalize(raw) else {
        return Verdict::Reject(RejectReason::Empty);
    };
    let candidate = Candidate::new(text);

    for rule in DESCRIPTION_RULES {
        if let Some(reason) = rule(&candidate, policy) {
            debug!(reason = %reason, len = candidate.len, "description rejected");
            return Verdict::Reject(reason);
        }
    }

    Verdict::Accept(candidate.text)
}

pub fn clean_description(raw: &str, policy: &DescriptionPolicy) -> Option<String> {
    classify_description(raw, policy).accepted()
}

pub fn reject_script(candidate: &Candidate, _: &DescriptionPolicy) -> Option<RejectReason> {
    SCRIPT_SIGNATURE_REGEX
        .is_match(&candidate.text)
        .then_some(RejectReason::Script)
}

pub fn reject_dead_page(candidate: &Candidate, _: &DescriptionPolicy) -> Option<RejectReason> {
    contains_dead_page_phrase(&candidate.lower).then_some(RejectReason::DeadPage)
}

pub fn reject_spec_sheet(candidate: &Candidate, _: &DescriptionPolicy) -> Option<RejectReason> {
    let colons = candidate.text.matches(':').count();
    let keyword_hits = spec_keyword_hits(&candidate.lower);
    let label_lines = label_value_lines(&candidate.text);

    let looks_like_sheet = colons >= SPEC_SHEET_THRESHOLD
        || keyword_hits >= SPEC_SHEET_THRESHOLD
        || label_lines >= SPEC_SHEET_THRESHOLD;
    if !looks_like_sheet {
        return None;
    }

    let spared = candidate.len < SHORT_SPEC_LENGTH && colons <= 1 && keyword_hits <= 1;
    (!spared).then_some(RejectReason::SpecSheet)
}

/// Counts `Label: value` shaped pieces, where the label is short and both
/// sides carry at least one word character.
fn label_value_lines(text: &str) -> usize {
    text.split(['\n', ';', '—', '–'])
        .flat_map(|line| line.split(".."))
        .filter(|line| {
            let Some(colon) = line.find(':') else {
                return false;
            };
            let label = &line[..colon];
            let value = &line[colon + 1..];
            let width = label.chars().count();
            width > 0 && width < LABEL_MAX_WIDTH && has_word_char(label) && has_word_char(value)
        })
        .count()
}

fn has_word_char(text: &str) -> bool {
    text.chars().any(|c| c.is_alphanumeric() || c == '_')
}

pub fn reject_duplicated_halves(
    candidate: &Candidate,
    _: &DescriptionPolicy,
) -> Option<RejectReason> {
    let half = candidate.len / 2;
    if half <= HALVES_MIN_MIDPOINT {
        return None;
    }

    let split_at = candidate
        .text
        .char_indices()
        .nth(half)
        .map(|(i, _)| i)
        .unwrap_or(candidate.text.len());
    let (first, second) = candidate.text.split_at(split_at);

    let second_words: Vec<&str> = second.split_whitespace().collect();
    let first_words: Vec<&str> = first.split_whitespace().collect();
    let repeated = first_words
        .iter()
        .filter(|word| second_words.contains(word))
        .count();

    let overlap = repeated as f64 / first_words.len().max(1) as f64;
    (overlap > HALVES_MAX_OVERLAP).then_some(RejectReason::Duplicated)
}

pub fn reject_markup(candidate: &Candidate, _: &DescriptionPolicy) -> Option<RejectReason> {
    RESIDUAL_MARKUP_REGEX
        .is_match(&candidate.text)
        .then_some(RejectReason::Markup)
}

pub fn reject_too_short(candidate: &Candidate, _: &DescriptionPolicy) -> Option<RejectReason> {
    (candidate.len < MIN_DESCRIPTION_LENGTH).then_some(RejectReason::TooShort)
}

pub fn reject_numeric_dump(
    candidate: &Candidate,
    policy: &DescriptionPolicy,
) -> Option<RejectReason> {
    let sentence_like =
        SENTENCE_SHAPE_REGEX.is_match(&candidate.text) || candidate.text.contains(". ");
    if sentence_like || candidate.len <= policy.numeric_min_len {
        return None;
    }

    let (digits, visible) = candidate
        .text
        .chars()
        .filter(|c| !c.is_whitespace())
        .fold((0usize, 0usize), |(digits, visible), c| {
            (digits + usize::from(c.is_ascii_digit()), visible + 1)
        });
    let ratio = digits as f64 / visible.max(1) as f64;
    (ratio > policy.numeric_ratio_max).then_some(RejectReason::NumericDump)
}

pub fn reject_spec_dense(candidate: &Candidate, policy: &DescriptionPolicy) -> Option<RejectReason> {
    let hits = spec_keyword_hits(&candidate.lower);
    (hits >= policy.final_spec_hits && candidate.len > policy.final_spec_min_len)
        .then_some(RejectReason::SpecDense)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> DescriptionPolicy {
        DescriptionPolicy::default()
    }

    fn candidate(text: &str) -> Candidate {
        Candidate::new(normalize(text).unwrap())
    }

    fn verdict(text: &str) -> Verdict {
        classify_description(text, &policy())
    }

    #[test]
    fn test_accepts_plain_prose() {
        let text = "This lightweight jacket keeps you warm in any weather, rain or snow.";
        assert_eq!(verdict(text), Verdict::Accept(text.to_string()));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(verdict("   \n "), Verdict::Reject(RejectReason::Empty));
    }

    #[test]
    fn test_rejects_script_signatures() {
        let samples = [
            "P.when('A').execute(function(A) { return A; }); Great kettle for tea lovers",
            "var ue_t0 = ue_t0 || +new Date(); a lovely product for every home",
            "window.ue && ue.count('x'); this is definitely product copy text",
            "<script>track()</script> A handy organiser for your desk drawers",
        ];
        for sample in samples {
            assert!(reject_script(&candidate(sample), &policy()).is_some(), "{sample}");
            assert_eq!(verdict(sample), Verdict::Reject(RejectReason::Script));
        }
    }

    #[test]
    fn test_rejects_dead_page() {
        let text = "Sorry! We couldn't find that page. Looking for something? Try searching.";
        assert_eq!(verdict(text), Verdict::Reject(RejectReason::DeadPage));
    }

    #[test]
    fn test_rejects_spec_dump() {
        let text = "ASIN: B000123 Manufacturer: Acme Item Weight: 200g Material: Steel Warranty: 1 year";
        assert_eq!(verdict(text), Verdict::Reject(RejectReason::SpecSheet));
    }

    #[test]
    fn test_rejects_long_label_value_sheet() {
        let text = "Model: TX-200; Finish: brushed nickel with a soft matte coat; \
                    Mounting: wall or ceiling with the included bracket set; \
                    Bulb: two E26 sockets rated for LED use; \
                    Cord: six feet of braided cable with an inline dimmer switch";
        let c = candidate(text);
        assert!(c.len > 200);
        assert_eq!(label_value_lines(&c.text), 5);
        assert_eq!(reject_spec_sheet(&c, &policy()), Some(RejectReason::SpecSheet));
    }

    #[test]
    fn test_spares_short_single_label() {
        let text = "Material: soft brushed cotton that stays comfortable all day long.";
        assert_eq!(reject_spec_sheet(&candidate(text), &policy()), None);
        assert!(verdict(text).is_accept());
    }

    #[test]
    fn test_rejects_duplicated_halves() {
        let half = "Premium ceramic mug with a glazed finish that keeps drinks hot for longer";
        let text = format!("{half} {half}");
        assert_eq!(
            reject_duplicated_halves(&candidate(&text), &policy()),
            Some(RejectReason::Duplicated)
        );
    }

    #[test]
    fn test_halves_ignored_for_short_text() {
        let text = "Cozy socks. Cozy socks. Cozy socks.";
        assert_eq!(reject_duplicated_halves(&candidate(text), &policy()), None);
    }

    #[test]
    fn test_rejects_residual_markup() {
        let text = "A roomy tote bag <div class=\"a-row\"> for weekend trips and errands";
        assert_eq!(verdict(text), Verdict::Reject(RejectReason::Markup));
    }

    #[test]
    fn test_rejects_too_short() {
        assert_eq!(verdict("Nice mug."), Verdict::Reject(RejectReason::TooShort));
    }

    #[test]
    fn test_rejects_numeric_dump() {
        let text = "Pack contents 1200 x 800 x 450 mm 2024 edition 3300 lumen 220 240 V 50 60 Hz \
                    12 months 18650 cells 5000 mAh 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17";
        let c = candidate(text);
        assert_eq!(reject_numeric_dump(&c, &policy()), Some(RejectReason::NumericDump));

        let relaxed = DescriptionPolicy {
            numeric_ratio_max: 0.9,
            ..policy()
        };
        assert_eq!(reject_numeric_dump(&c, &relaxed), None);
    }

    #[test]
    fn test_numeric_rule_spares_prose() {
        let text = "Charges in 30 minutes. Runs for 12 hours at 50 percent 2024 1080 4096 2048 \
                    1024 512 256 128 64 32 16 8 4 2 1 3 5 7 9 11 13 17 19 23 29 31 37";
        assert_eq!(reject_numeric_dump(&candidate(text), &policy()), None);
    }

    #[test]
    fn test_rejects_spec_dense_prose() {
        let text = "A compact power bank whose battery capacity and waterproof shell make it \
                    the brand favourite for hikers who want storage for every trip outdoors";
        let c = candidate(text);
        assert!(spec_keyword_hits(&c.lower) >= 5);
        assert_eq!(reject_spec_dense(&c, &policy()), Some(RejectReason::SpecDense));

        let lenient = DescriptionPolicy {
            final_spec_hits: 10,
            ..policy()
        };
        assert_eq!(reject_spec_dense(&c, &lenient), None);
    }

    #[test]
    fn test_decodes_and_collapses_on_accept() {
        let text = "  Handmade   in small batches&nbsp;using &quot;slow&quot; methods<br>since 1990 ";
        assert_eq!(
            clean_description(text, &policy()).as_deref(),
            Some("Handmade in small batches using \"slow\" methods since 1990")
        );
    }
}
