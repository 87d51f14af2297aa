use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use listing_extract::{
    config::Config,
    extractor::{Extractor, ListingCandidates},
    rewrite::RewritePrompt,
};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing; stdout is reserved for the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env()?;

    let mut show_prompt = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        if arg == "--prompt" {
            show_prompt = true;
        } else {
            path = Some(arg);
        }
    }

    let input = match &path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let candidates: ListingCandidates =
        serde_json::from_str(&input).context("input is not a valid candidates document")?;
    info!(source = path.as_deref().unwrap_or("stdin"), "extracting listing");

    let listing = Extractor::from_config(&config).extract(&candidates);
    println!("{}", serde_json::to_string_pretty(&listing)?);

    if show_prompt {
        let prompt = RewritePrompt::for_listing(&listing);
        println!("\n{}", prompt.combined());
    }

    Ok(())
}
