//! Prompt construction and response parsing for the listing rewrite step.
//!
//! The completion call itself lives outside this crate. This module fixes the
//! shape of what goes in (a system instruction plus the extracted fields) and
//! how the model's free-form reply is turned back into an
//! [`OptimizedListing`].

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::extractor::ExtractedListing;

const SYSTEM_INSTRUCTION: &str = r#"You are an ecommerce copy expert who improves product listings.
Return JSON only using this exact schema:
{
  "title": "optimized title (string, <=200 chars)",
  "bullets": ["bullet1","bullet2",...],    // 3-5 bullets
  "description": "optimized description (string)",
  "keywords": ["kw1","kw2", ...]            // 3-8 keywords
}
Do NOT include any explanation or extraneous text. If a field cannot be produced, return an empty string or empty array. Avoid unsubstantiated claims."#;

const RETRY_PREFIX: &str = "You must only reply with valid JSON following this schema.";

static JSON_OBJECT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewritePrompt {
    pub system: String,
    pub user: String,
}

impl RewritePrompt {
    /// Only fields that were actually extracted are shown to the model.
    pub fn for_listing(listing: &ExtractedListing) -> Self {
        let mut parts = Vec::new();
        if let Some(title) = &listing.title {
            parts.push(format!("Original title:\n{title}"));
        }
        if !listing.bullets.is_empty() {
            parts.push(format!(
                "Original bullets:\n- {}",
                listing.bullets.join("\n- ")
            ));
        }
        if let Some(description) = &listing.description {
            parts.push(format!("Original description:\n{description}"));
        }

        Self {
            system: SYSTEM_INSTRUCTION.to_string(),
            user: format!(
                "Optimize this product listing and return JSON only as specified.\n\n{}",
                parts.join("\n\n")
            ),
        }
    }

    /// Single input combining both messages, for completion APIs without roles.
    pub fn combined(&self) -> String {
        format!("{}\n\n{}", self.system, self.user)
    }

    /// Stricter follow-up sent when the first reply had no parseable JSON.
    pub fn retry_message(&self) -> String {
        format!("{RETRY_PREFIX} {}", self.user)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizedListing {
    pub title: String,
    pub bullets: Vec<String>,
    pub description: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RewriteError {
    #[error("response contained no parseable JSON")]
    NoJson,

    #[error("response JSON is not an object")]
    NotAnObject,
}

/// Parse a model reply, tolerating prose around the JSON object.
///
/// Missing or mistyped fields fall back to empty values; a missing title
/// falls back to `fallback_title`.
pub fn parse_response(
    raw: &str,
    fallback_title: Option<&str>,
) -> Result<OptimizedListing, RewriteError> {
    let value = serde_json::from_str::<Value>(raw.trim())
        .ok()
        .or_else(|| {
            JSON_OBJECT_REGEX
                .find(raw)
                .and_then(|m| serde_json::from_str(m.as_str()).ok())
        })
        .ok_or(RewriteError::NoJson)?;

    let Value::Object(object) = value else {
        return Err(RewriteError::NotAnObject);
    };

    let title = match object.get("title") {
        Some(Value::String(title)) => title.trim().to_string(),
        _ => fallback_title.unwrap_or_default().to_string(),
    };

    Ok(OptimizedListing {
        title,
        bullets: string_list(&object, "bullets"),
        description: match object.get("description") {
            Some(Value::String(description)) => description.trim().to_string(),
            _ => String::new(),
        },
        keywords: string_list(&object, "keywords"),
    })
}

fn string_list(object: &Map<String, Value>, key: &str) -> Vec<String> {
    match object.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.trim().to_string(),
                other => other.to_string().trim().to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}
