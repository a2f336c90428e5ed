//! Index assembly: extracted documents in, combined index + store out.
//!
//! Every page is fed to the elasticlunr builder as a full record, then
//! each of its anchored sub-headings as a sparse record whose reference
//! is `<page url>#<heading id>`. The store maps page urls (never heading
//! fragments) back to the full extracted record so the browser client can
//! render hits without refetching pages.

use crate::types::ExtractedDocument;
use elasticlunr::{Index, IndexBuilder};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Reference field: the unique lookup key of every indexed record.
pub const REF_FIELD: &str = "url";

/// Indexed fields, in builder order. Record values are supplied to the
/// builder in this same order.
pub const INDEXED_FIELDS: [&str; 4] = ["title", "name", "text", "component"];

/// Query-time field weights for the browser search client.
///
/// elasticlunr applies boosts on the query side, so they are not part of
/// the serialized index and the artifact stays exactly `{index, store}`
/// (the shape the client's decoder expects). The client bundle is built
/// against this crate and compiles the scheme in from these constants;
/// they are the single source of truth for both sides.
pub const FIELD_WEIGHTS: [(&str, f64); 4] = [
    ("title", 10.0),
    ("name", 1.0),
    ("text", 1.0),
    ("component", 1.0),
];

/// Lookup store from page url to its full extracted record.
///
/// A `BTreeMap` keeps serialization deterministic for identical input.
pub type Store = BTreeMap<String, ExtractedDocument>;

/// A finalized index paired with its lookup store.
pub struct BuiltIndex {
    pub index: Index,
    pub store: Store,
}

/// Result of assembling the index over a batch of pages.
///
/// `Empty` is a distinct sentinel for a zero-page batch, not an index
/// over zero documents: it serializes to exactly `{}` and produces no
/// artifact downstream.
pub enum SearchIndex {
    Empty,
    Built(BuiltIndex),
}

impl SearchIndex {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, SearchIndex::Empty)
    }

    /// The built index and store, when the batch was non-empty.
    #[must_use]
    pub fn built(&self) -> Option<&BuiltIndex> {
        match self {
            SearchIndex::Empty => None,
            SearchIndex::Built(built) => Some(built),
        }
    }
}

impl Serialize for SearchIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SearchIndex::Empty => serializer.serialize_map(Some(0))?.end(),
            SearchIndex::Built(built) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("index", &built.index)?;
                map.serialize_entry("store", &built.store)?;
                map.end()
            }
        }
    }
}

/// Build the combined index + store from the full ordered document batch.
///
/// Documents are inserted in input order, heading records immediately
/// after their page in document order, so the serialized index is
/// byte-identical across runs for identical input.
pub fn build_index(docs: Vec<ExtractedDocument>) -> SearchIndex {
    if docs.is_empty() {
        log::debug!("No pages to index, emitting empty search index");
        return SearchIndex::Empty;
    }

    let mut index = IndexBuilder::new()
        .set_ref(REF_FIELD)
        .add_field(INDEXED_FIELDS[0])
        .add_field(INDEXED_FIELDS[1])
        .add_field(INDEXED_FIELDS[2])
        .add_field(INDEXED_FIELDS[3])
        .build();

    let mut store = Store::new();
    let page_count = docs.len();
    let mut heading_count = 0usize;

    for doc in docs {
        index.add_doc(
            &doc.url,
            &[
                doc.title.as_str(),
                doc.name.as_str(),
                doc.text.as_str(),
                doc.component.as_str(),
            ],
        );

        for heading in &doc.titles {
            // HeadingRef ids are non-empty by construction (extractor
            // drops id-less headings), so the builder never sees a
            // heading record without a usable reference.
            let anchor = format!("{}#{}", doc.url, heading.id);
            index.add_doc(&anchor, &[heading.text.as_str(), "", "", ""]);
            heading_count += 1;
        }

        let url = doc.url.clone();
        if store.insert(url.clone(), doc).is_some() {
            log::warn!("Duplicate page url {url}, later page replaces the earlier one");
        }
    }

    tracing::debug!(
        pages = page_count,
        headings = heading_count,
        "Assembled search index"
    );

    SearchIndex::Built(BuiltIndex { index, store })
}
