#![no_main]

use libfuzzer_sys::fuzz_target;

use listing_extract::extractor::{ListingCandidates, extract};

fuzz_target!(|data: &[u8]| {
    // Convert raw bytes to string, handling invalid UTF-8 gracefully
    let text = String::from_utf8_lossy(data).to_string();

    let candidates = ListingCandidates {
        titles: vec![text.clone()],
        scripts: vec![text.clone()],
        bullets: vec![text.clone()],
        descriptions: vec![text],
    };

    // The extractor should never panic regardless of input
    let listing = extract(&candidates);
    assert!(listing.bullets.len() <= 8);
});
