pub mod bullets;
pub mod cleaner;
pub mod model;
pub mod reject;
pub mod splitter;
pub mod title;
pub mod vocab;

#[cfg(test)]
mod tests;

pub use bullets::classify_bullets;
pub use cleaner::normalize;
pub use model::{ExtractedListing, ListingCandidates, RejectReason, Segment, Verdict};
pub use reject::{classify_description, clean_description};
pub use splitter::split;

use tracing::{info, instrument, warn};

use crate::config::{BulletPolicy, Config, DescriptionPolicy};

/// Bullet sources tried in order: the primary blob plus two alternatives.
const MAX_BULLET_SOURCES: usize = 3;

/// Runs the normalizer and classifiers over one page's candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor {
    bullets: BulletPolicy,
    description: DescriptionPolicy,
}

impl Extractor {
    pub fn new(bullets: BulletPolicy, description: DescriptionPolicy) -> Self {
        Self {
            bullets,
            description,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.bullets(), config.description())
    }

    #[instrument(skip_all, fields(titles = candidates.titles.len(), bullet_sources = candidates.bullets.len()))]
    pub fn extract(&self, candidates: &ListingCandidates) -> ExtractedListing {
        // 1. Title by priority, script as last resort
        let title = title::pick_title(&candidates.titles, &candidates.scripts);

        // 2. Bullets from the first source that yields any
        let bullets = self.extract_bullets(&candidates.bullets);

        // 3. First description that survives the noise rules
        let description = candidates
            .descriptions
            .iter()
            .find_map(|candidate| clean_description(candidate, &self.description));

        let listing = ExtractedListing {
            title,
            bullets,
            description,
        };

        if listing.is_empty() {
            warn!("no usable content in candidates");
        } else {
            info!(
                has_title = listing.title.is_some(),
                bullets = listing.bullets.len(),
                has_description = listing.description.is_some(),
                "listing extracted"
            );
        }

        listing
    }

    fn extract_bullets(&self, sources: &[String]) -> Vec<String> {
        for source in sources.iter().take(MAX_BULLET_SOURCES) {
            let bullets = classify_bullets(&split(source), &self.bullets);
            if !bullets.is_empty() {
                return dedup_exact(bullets);
            }
        }
        Vec::new()
    }
}

fn dedup_exact(bullets: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(bullets.len());
    for bullet in bullets {
        let bullet = bullet.trim().to_string();
        if !bullet.is_empty() && !out.contains(&bullet) {
            out.push(bullet);
        }
    }
    out
}

/// Extract with the default thresholds.
pub fn extract(candidates: &ListingCandidates) -> ExtractedListing {
    Extractor::default().extract(candidates)
}
