pub mod config;
pub mod extractor;
pub mod rewrite;

pub use config::Config;
pub use extractor::{ExtractedListing, Extractor, ListingCandidates, extract};
