//! Common types shared across the extraction and indexing pipeline
//!
//! These are the explicit record shapes flowing between the extractor,
//! the index assembler, and the artifact serializer.

use serde::{Deserialize, Serialize};

/// One rendered documentation page as supplied by the site pipeline.
///
/// Read-only input: nothing in this crate mutates a page, and pages are
/// processed independently of one another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInput {
    /// Rendered HTML content of the page.
    pub html: String,
    /// Name of the component (documentation unit) that owns the page.
    pub component: String,
    /// Component version the page was published under.
    pub version: String,
    /// Page identifier without extension, e.g. `index` or `install`.
    pub stem: String,
    /// Site-relative published URL, e.g. `/component/1.0/install.html`.
    pub pub_url: String,
}

/// A sub-heading within a page that carries a stable anchor identifier.
///
/// Headings without an `id` attribute cannot be targeted by a search hit
/// and are dropped during extraction, so `id` is non-empty by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingRef {
    pub text: String,
    pub id: String,
}

/// The indexable fields extracted from a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Normalized body text with title and sub-headings removed.
    pub text: String,
    /// Text of the first `<h1>` in the article region; empty when absent.
    pub title: String,
    pub component: String,
    pub version: String,
    /// Page stem, indexed so bare page names match.
    pub name: String,
    /// Absolute URL when a site base URL is configured, otherwise the
    /// published relative URL. Unique per page.
    pub url: String,
    /// Sub-headings with anchor ids, in document order.
    pub titles: Vec<HeadingRef>,
}
