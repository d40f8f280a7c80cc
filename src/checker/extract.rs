// src/checker/extract.rs
// =============================================================================
// This module extracts links from the raw text of a document.
//
// Unlike a full Markdown parser, we scan the text with one regular
// expression that has two alternatives:
// 1. A bare URL:      https://example.com/page
// 2. A Markdown link: [label](https://example.com/page)
//
// Scanning raw text means we also find links in plain text files, HTML
// snippets, code blocks and release notes - anything a reader could click.
//
// Rust concepts:
// - regex::Regex: compiled regular expressions with capture groups
// - HashSet::insert: returns false when the value was already present,
//   which gives us order-preserving dedup in one pass
// =============================================================================

use regex::Regex;
use std::collections::HashSet;

use super::error::CheckError;

// Capture group 1: bare URL (stops at whitespace, ')', quotes and angle brackets)
// Capture group 2: the target of a Markdown link, [label](target)
const LINK_PATTERN: &str = r#"(https?://[^\s\)"'<>]+)|\[.*?\]\((.*?)\)"#;

// Extracts all unique HTTP/HTTPS links from text
//
// Parameters:
//   text: the document content (borrowed as &str)
//
// Returns: the links in the order they first appear, without duplicates
//
// Example input:
//   "See https://example.com/a and [link](https://example.com/b)"
//
// Example output:
//   vec!["https://example.com/a", "https://example.com/b"]
pub fn extract_links(text: &str) -> Result<Vec<String>, CheckError> {
    // The pattern is a constant, so this only fails if LINK_PATTERN is edited
    // into something invalid. We still propagate instead of panicking.
    let pattern = Regex::new(LINK_PATTERN)?;

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for caps in pattern.captures_iter(text) {
        // Both groups are tested on their own; a match only ever fills one of
        // them, but a duplicate from the other form is removed by `seen`.
        for group in [caps.get(1), caps.get(2)].into_iter().flatten() {
            let candidate = group.as_str();
            // An empty group never has the prefix, so this also skips it
            if !is_http_link(candidate) {
                continue;
            }
            if seen.insert(candidate) {
                links.push(candidate.to_string());
            }
        }
    }

    tracing::debug!(count = links.len(), "extracted links");
    Ok(links)
}

// Only http:// and https:// targets are checked.
// Skips mailto:, relative paths, anchors, etc.
fn is_http_link(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
