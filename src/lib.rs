//! docindex: client-side search index generation for documentation sites
//!
//! Pipeline, composed in sequence with one-way data flow:
//! raw pages -> extracted records -> index + store -> compressed artifact.
//!
//! - [`extractor`] pulls title, anchored sub-headings and normalized body
//!   text out of each page's article region
//! - [`assembler`] feeds page and heading records into elasticlunr and
//!   pairs the finalized index with a url -> record store
//! - [`artifact`] serializes, UTF-16-encodes and gzips the result into a
//!   fixed-path publishable asset

pub mod artifact;
pub mod assembler;
pub mod config;
pub mod errors;
pub mod extractor;
pub mod types;

pub use artifact::{SearchIndexAsset, build_artifact, decode_artifact, write_artifact};
pub use assembler::{
    BuiltIndex, FIELD_WEIGHTS, INDEXED_FIELDS, REF_FIELD, SearchIndex, Store, build_index,
};
pub use config::{Manifest, ManifestPage, SiteConfig};
pub use errors::{IndexGenError, IndexGenResult};
pub use extractor::{extract_all, extract_document};
pub use types::{ExtractedDocument, HeadingRef, PageInput};

/// Run the full pipeline over a batch of pages.
///
/// Returns `Ok(None)` when `pages` is empty: an empty batch is a distinct
/// "no index" outcome, not an error and not an empty artifact.
pub fn generate_index(
    site: &SiteConfig,
    pages: &[PageInput],
) -> IndexGenResult<Option<SearchIndexAsset>> {
    let docs = extract_all(pages, site.base_url());
    let index = build_index(docs);
    build_artifact(&index)
}
