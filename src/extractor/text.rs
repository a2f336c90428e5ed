//! Text normalization for extracted page content.
//!
//! The DOM walk already yields bare text nodes, but rendered pages still
//! carry double-encoded entities and the occasional raw tag fragment
//! inside text content. Normalization makes the indexed text uniform:
//! entities decoded, tag-like fragments stripped, whitespace collapsed.

use html_escape::decode_html_entities;
use regex::Regex;
use std::sync::LazyLock;

// Parsed once at first access and cached forever.
// A hardcoded regex should never fail to parse - if it does, it's a bug.
static TAG_FRAGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]+>").expect("BUG: hardcoded tag-fragment regex is invalid")
});

/// Normalize raw extracted text into a single indexable line.
///
/// 1. Decode HTML entities (`&amp;lt;` style double-encoding included)
/// 2. Strip residual `<...>` fragments left in text content
/// 3. Collapse all whitespace runs (spaces, tabs, newlines, carriage
///    returns) into single spaces and trim the ends
pub fn normalize_text(raw: &str) -> String {
    let decoded = decode_html_entities(raw);
    let stripped = TAG_FRAGMENT_RE.replace_all(&decoded, "");
    collapse_whitespace(&stripped)
}

/// Collapse whitespace runs into single spaces, trimming both ends.
pub fn collapse_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for word in raw.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
