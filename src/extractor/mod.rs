//! Indexable-text extraction from rendered documentation pages.
//!
//! Extraction is scoped to the article content region of each page:
//! 1. The first `<h1>` inside the region becomes the document title
//! 2. Sub-headings (`h2`-`h6`) with anchor ids become heading references
//! 3. Everything else becomes normalized body text; title and headings
//!    are excluded so they are neither duplicated nor re-indexed as body
//!
//! Extraction is best-effort and never fails the batch: a page with no
//! article region, no `<h1>`, or no headings degrades to empty fields.

mod text;

pub use text::{collapse_whitespace, normalize_text};

use crate::types::{ExtractedDocument, HeadingRef, PageInput};
use ego_tree::NodeId;
use rayon::prelude::*;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Maximum HTML nesting depth to prevent stack overflow on malformed
/// or adversarial pages. Legitimate documentation rarely exceeds 20
/// levels of nesting, so 100 leaves generous headroom; branches deeper
/// than the limit are truncated, everything above them is kept.
const MAX_HTML_NESTING_DEPTH: usize = 100;

/// Elements whose text continues the surrounding word. Everything else
/// is treated as a flow boundary and separated with a space, so sibling
/// blocks (and the gap left by an excluded heading) never fuse adjacent
/// words, while `re<code>name</code>d` stays one token.
const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "cite", "code", "data", "dfn", "em", "i", "kbd", "mark", "q",
    "s", "samp", "small", "span", "strong", "sub", "sup", "time", "u", "var", "wbr",
];

// ============================================================================
// CSS Selectors for article extraction
// ============================================================================

// These are parsed once at first access and cached forever.
// Hardcoded selectors should NEVER fail to parse - if they do, it's a bug.

static ARTICLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("article.doc").expect("BUG: hardcoded CSS selector 'article.doc' is invalid")
});

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("BUG: hardcoded CSS selector 'h1' is invalid"));

static SUBHEADING_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h2, h3, h4, h5, h6")
        .expect("BUG: hardcoded CSS selector 'h2, h3, h4, h5, h6' is invalid")
});

/// Extract the indexable fields from one page.
///
/// `site_url` is the optional site base URL; when present it is prefixed
/// (minus any trailing slash) to the page's published URL.
pub fn extract_document(page: &PageInput, site_url: Option<&str>) -> ExtractedDocument {
    let url = page_url(site_url, &page.pub_url);
    let dom = Html::parse_document(&page.html);

    let Some(article) = dom.select(&ARTICLE_SELECTOR).next() else {
        log::debug!("page {} has no article region, indexing empty fields", url);
        return ExtractedDocument {
            text: String::new(),
            title: String::new(),
            component: page.component.clone(),
            version: page.version.clone(),
            name: page.stem.clone(),
            url,
            titles: Vec::new(),
        };
    };

    // Single pass over the headings: build the exclusion set for the body
    // walk and the HeadingRef sequence together, instead of detaching
    // nodes mid-traversal.
    let mut excluded: HashSet<NodeId> = HashSet::new();

    let title = match article.select(&TITLE_SELECTOR).next() {
        Some(h1) => {
            excluded.insert(h1.id());
            collapse_whitespace(&h1.text().collect::<String>())
        }
        None => String::new(),
    };

    let mut titles = Vec::new();
    for heading in article.select(&SUBHEADING_SELECTOR) {
        // Headings are excluded from body text whether or not they carry
        // an id; only the ones with an id can be targeted by a search hit.
        excluded.insert(heading.id());
        match heading.value().attr("id") {
            Some(id) if !id.is_empty() => titles.push(HeadingRef {
                text: collapse_whitespace(&heading.text().collect::<String>()),
                id: id.to_string(),
            }),
            _ => {
                log::debug!("page {} has a heading without an anchor id, skipping", url);
            }
        }
    }

    let mut raw_text = String::new();
    collect_text_excluding(&article, &excluded, &mut raw_text, 0);

    ExtractedDocument {
        text: normalize_text(&raw_text),
        title,
        component: page.component.clone(),
        version: page.version.clone(),
        name: page.stem.clone(),
        url,
        titles,
    }
}

/// Extract every page, in parallel, preserving input order.
///
/// Pages share no state, so extraction fans out across the rayon pool;
/// the collected results keep the caller's ordering so index assembly
/// stays deterministic.
pub fn extract_all(pages: &[PageInput], site_url: Option<&str>) -> Vec<ExtractedDocument> {
    pages
        .par_iter()
        .map(|page| extract_document(page, site_url))
        .collect()
}

/// Join the site base URL (trailing slash trimmed) with the page's
/// published URL. Without a base URL the published URL is used as-is,
/// yielding a relative link.
fn page_url(site_url: Option<&str>, pub_url: &str) -> String {
    match site_url {
        Some(base) => format!("{}{}", base.trim_end_matches('/'), pub_url),
        None => pub_url.to_string(),
    }
}

/// Recursively collect the text content of `element`, skipping excluded
/// subtrees (the title and sub-heading nodes). Non-inline children are
/// separated with spaces; `normalize_text` collapses the extra runs.
fn collect_text_excluding(
    element: &ElementRef,
    excluded: &HashSet<NodeId>,
    output: &mut String,
    depth: usize,
) {
    if depth > MAX_HTML_NESTING_DEPTH {
        tracing::warn!(
            element = element.value().name(),
            depth,
            limit = MAX_HTML_NESTING_DEPTH,
            "Maximum HTML nesting depth exceeded, truncating text extraction"
        );
        return;
    }

    for child in element.children() {
        use scraper::node::Node;

        match child.value() {
            Node::Text(chunk) => output.push_str(chunk),
            Node::Element(child_el) => {
                if let Some(child_elem) = ElementRef::wrap(child) {
                    if excluded.contains(&child_elem.id()) {
                        // The excluded subtree still marks a flow
                        // boundary between its neighbors.
                        output.push(' ');
                        continue;
                    }
                    if INLINE_ELEMENTS.contains(&child_el.name()) {
                        collect_text_excluding(&child_elem, excluded, output, depth + 1);
                    } else {
                        output.push(' ');
                        collect_text_excluding(&child_elem, excluded, output, depth + 1);
                        output.push(' ');
                    }
                }
            }
            // Comments, doctypes and processing instructions carry no
            // indexable text.
            _ => {}
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str) -> PageInput {
        PageInput {
            html: html.to_string(),
            component: "server".to_string(),
            version: "2.1".to_string(),
            stem: "install".to_string(),
            pub_url: "/server/2.1/install.html".to_string(),
        }
    }

    #[test]
    fn test_title_extracted_and_removed_from_body() {
        let doc = extract_document(
            &page("<article class=\"doc\"><h1>Intro</h1><p>Body text here.</p></article>"),
            None,
        );
        assert_eq!(doc.title, "Intro");
        assert_eq!(doc.text, "Body text here.");
        assert!(!doc.text.contains("Intro"));
    }

    #[test]
    fn test_missing_h1_yields_empty_title() {
        let doc = extract_document(
            &page("<article class=\"doc\"><p>Only body.</p></article>"),
            None,
        );
        assert_eq!(doc.title, "");
        assert_eq!(doc.text, "Only body.");
    }

    #[test]
    fn test_missing_article_region_yields_empty_fields() {
        let doc = extract_document(&page("<main><h1>Not an article</h1></main>"), None);
        assert_eq!(doc.title, "");
        assert_eq!(doc.text, "");
        assert!(doc.titles.is_empty());
        // Metadata is still carried through.
        assert_eq!(doc.component, "server");
        assert_eq!(doc.name, "install");
        assert_eq!(doc.url, "/server/2.1/install.html");
    }

    #[test]
    fn test_headings_without_id_are_dropped_but_still_excluded() {
        let html = "<article class=\"doc\">\
            <h1>Title</h1>\
            <h2 id=\"a\">Anchored</h2>\
            <h2>Unanchored</h2>\
            <p>Body.</p>\
            </article>";
        let doc = extract_document(&page(html), None);
        assert_eq!(
            doc.titles,
            vec![HeadingRef {
                text: "Anchored".to_string(),
                id: "a".to_string(),
            }]
        );
        assert!(!doc.text.contains("Anchored"));
        assert!(!doc.text.contains("Unanchored"));
        assert_eq!(doc.text, "Body.");
    }

    #[test]
    fn test_headings_recorded_in_document_order() {
        let html = "<article class=\"doc\">\
            <h2 id=\"first\">First</h2>\
            <section><h3 id=\"second\">Second</h3></section>\
            <h2 id=\"third\">Third</h2>\
            </article>";
        let doc = extract_document(&page(html), None);
        let ids: Vec<&str> = doc.titles.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_empty_heading_id_treated_as_missing() {
        let html = "<article class=\"doc\"><h2 id=\"\">Blank</h2><p>Body.</p></article>";
        let doc = extract_document(&page(html), None);
        assert!(doc.titles.is_empty());
        assert!(!doc.text.contains("Blank"));
    }

    #[test]
    fn test_adjacent_blocks_do_not_fuse_words() {
        // No whitespace between the sibling elements in the markup.
        let html = "<article class=\"doc\"><p>one</p><p>two</p></article>";
        let doc = extract_document(&page(html), None);
        assert_eq!(doc.text, "one two");
    }

    #[test]
    fn test_excluded_heading_separates_its_neighbors() {
        let html = "<article class=\"doc\">\
            <p>Download the package.</p>\
            <h2 id=\"linux\">Linux</h2>\
            <p>Use the tarball.</p>\
            <h2>Notes</h2>\
            <p>Closing remarks.</p>\
            </article>";
        let doc = extract_document(&page(html), None);
        assert_eq!(
            doc.text,
            "Download the package. Use the tarball. Closing remarks."
        );
    }

    #[test]
    fn test_inline_markup_does_not_split_words() {
        let html = "<article class=\"doc\"><p>re<code>name</code>d files</p></article>";
        let doc = extract_document(&page(html), None);
        assert_eq!(doc.text, "renamed files");
    }

    #[test]
    fn test_whitespace_normalized_in_body() {
        let html = "<article class=\"doc\"><p>first\t\tline</p>\n\n<p>second\r\nline</p></article>";
        let doc = extract_document(&page(html), None);
        assert_eq!(doc.text, "first line second line");
    }

    #[test]
    fn test_url_with_site_base() {
        let doc = extract_document(
            &page("<article class=\"doc\"></article>"),
            Some("https://ex.com/"),
        );
        assert_eq!(doc.url, "https://ex.com/server/2.1/install.html");
    }

    #[test]
    fn test_url_without_site_base_is_relative() {
        let doc = extract_document(&page("<article class=\"doc\"></article>"), None);
        assert_eq!(doc.url, "/server/2.1/install.html");
    }

    #[test]
    fn test_navigation_outside_article_never_visited() {
        let html = "<body><nav>Sidebar chrome</nav>\
            <article class=\"doc\"><h1>T</h1><p>Content.</p></article>\
            <footer>Footer chrome</footer></body>";
        let doc = extract_document(&page(html), None);
        assert!(!doc.text.contains("chrome"));
        assert_eq!(doc.text, "Content.");
    }

    #[test]
    fn test_only_first_h1_becomes_title() {
        let html =
            "<article class=\"doc\"><h1>Real Title</h1><p>Body.</p><h1>Stray</h1></article>";
        let doc = extract_document(&page(html), None);
        assert_eq!(doc.title, "Real Title");
        // Only the first top-level heading is removed from body text.
        assert!(doc.text.contains("Stray"));
    }

    #[test]
    fn test_extract_all_preserves_input_order() {
        let pages: Vec<PageInput> = (0..16)
            .map(|i| PageInput {
                html: format!("<article class=\"doc\"><h1>Page {i}</h1></article>"),
                component: "c".to_string(),
                version: "1".to_string(),
                stem: format!("p{i}"),
                pub_url: format!("/c/1/p{i}.html"),
            })
            .collect();
        let docs = extract_all(&pages, None);
        assert_eq!(docs.len(), 16);
        for (i, doc) in docs.iter().enumerate() {
            assert_eq!(doc.title, format!("Page {i}"));
            assert_eq!(doc.url, format!("/c/1/p{i}.html"));
        }
    }
}
