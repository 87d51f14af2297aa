use std::fs;
use std::sync::Arc;
use std::thread;

use crate::config::{BulletPolicy, DescriptionPolicy};
use crate::extractor::{Extractor, ListingCandidates, extract};

fn load_fixture(name: &str) -> ListingCandidates {
    let raw = fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture");
    serde_json::from_str(&raw).expect("Fixture is not valid candidates JSON")
}

#[test]
fn test_extract_product_page() {
    let listing = extract(&load_fixture("product_page.json"));

    assert_eq!(
        listing.title.as_deref(),
        Some("Insulated Steel Water Bottle, 750 ml")
    );
    assert_eq!(
        listing.bullets,
        vec![
            "Durable stainless steel build.",
            "Fits all standard mounts",
            "Waterproof up to IP68",
            "Keeps drinks cold for twenty four hours straight.",
        ]
    );
    // The spec dump is skipped in favour of the prose candidate
    assert_eq!(
        listing.description.as_deref(),
        Some(
            "Our bottle is built for long days outdoors. The double wall keeps coffee hot \
             through the morning commute and water icy on the trail."
        )
    );
    assert!(!listing.is_empty());
}

#[test]
fn test_dead_page_yields_empty_listing() {
    let listing = extract(&load_fixture("dead_page.json"));

    assert_eq!(listing.title, None);
    assert!(listing.bullets.is_empty());
    assert_eq!(listing.description, None);
    assert!(listing.is_empty());
}

#[test]
fn test_script_title_and_fallback_sources() {
    let listing = extract(&load_fixture("script_title.json"));

    assert_eq!(listing.title.as_deref(), Some("Bamboo Cutting Board Set of 3"));
    assert_eq!(
        listing.bullets,
        vec!["Hand finished bamboo surface", "Gentle on knife edges"]
    );
    assert_eq!(
        listing.description.as_deref(),
        Some("Three boards in graduated sizes cover everything from garlic to a holiday roast.")
    );
}

#[test]
fn test_only_three_bullet_sources_are_tried() {
    let candidates = ListingCandidates {
        bullets: vec![
            "<li>Customer reviews</li>".to_string(),
            "<li>12,340 ratings</li>".to_string(),
            "<li>See all reviews</li>".to_string(),
            "Fourth source has real copy\nAnd another line".to_string(),
        ],
        ..Default::default()
    };
    assert!(extract(&candidates).bullets.is_empty());
}

#[test]
fn test_custom_policies_apply() {
    let extractor = Extractor::new(
        BulletPolicy {
            max_bullets: 2,
            fallback_min: 1,
        },
        DescriptionPolicy::default(),
    );
    let listing = extractor.extract(&load_fixture("product_page.json"));
    assert_eq!(
        listing.bullets,
        vec!["Durable stainless steel build.", "Fits all standard mounts"]
    );
}

#[test]
fn test_concurrent_extraction_is_deterministic() {
    let candidates = Arc::new(load_fixture("product_page.json"));
    let expected = extract(&candidates);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let candidates = Arc::clone(&candidates);
            thread::spawn(move || extract(&candidates))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use crate::extractor::{classify_bullets, classify_description, normalize, split};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(
            title in ".*",
            bullets in ".*",
            description in ".*",
        ) {
            let candidates = ListingCandidates {
                titles: vec![title],
                scripts: vec![],
                bullets: vec![bullets],
                descriptions: vec![description.clone()],
            };
            let _ = extract(&candidates);
            let _ = classify_description(&description, &DescriptionPolicy::default());
        }

        #[test]
        fn test_bullets_capped_and_unique(
            raw in "[a-zA-Z0-9 :;.\n•<>/-]{0,600}",
            max_bullets in 1usize..10,
        ) {
            let policy = BulletPolicy { max_bullets, fallback_min: 4 };
            let out = classify_bullets(&split(&raw), &policy);
            prop_assert!(out.len() <= max_bullets);
            let mut lowered: Vec<String> = out.iter().map(|b| b.to_lowercase()).collect();
            lowered.sort();
            lowered.dedup();
            prop_assert_eq!(lowered.len(), out.len());
            prop_assert!(out.iter().all(|b| !b.trim().is_empty()));
        }

        #[test]
        fn test_normalize_idempotent(
            text in "(&amp;|&nbsp;|&quot;|&#39;|[a-zA-Z0-9 \t\n.,<>/&;#])*",
        ) {
            if let Some(once) = normalize(&text) {
                prop_assert_eq!(normalize(&once), Some(once.clone()));
            }
        }
    }
}
