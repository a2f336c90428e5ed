//! Configuration and manifest types for index generation
//!
//! The library itself only needs `SiteConfig`. The manifest types model
//! the JSON file the CLI consumes: one site configuration plus the
//! ordered page list, each page carrying its HTML inline or as a path
//! relative to the manifest.

use crate::errors::IndexGenResult;
use crate::types::PageInput;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Site-level configuration supplied by the surrounding pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Optional site base URL. When present, document urls are absolute;
    /// otherwise they stay relative to the site root.
    pub url: Option<String>,
}

impl SiteConfig {
    /// The configured base URL, if any.
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

/// One page entry in a generation manifest.
///
/// Exactly one of `html` (inline content) or `html_path` (file relative
/// to the manifest) supplies the page markup; inline content wins when
/// both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestPage {
    pub component: String,
    pub version: String,
    pub stem: String,
    pub pub_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_path: Option<PathBuf>,
}

/// The CLI input: site configuration plus the ordered page list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub pages: Vec<ManifestPage>,
}

impl Manifest {
    /// Load a manifest from a JSON file.
    pub fn load(path: &Path) -> IndexGenResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Resolve manifest pages into `PageInput`s, reading referenced HTML
    /// files relative to `base_dir` (normally the manifest's directory).
    pub fn resolve_pages(&self, base_dir: &Path) -> IndexGenResult<Vec<PageInput>> {
        let mut pages = Vec::with_capacity(self.pages.len());
        for entry in &self.pages {
            let html = match (&entry.html, &entry.html_path) {
                (Some(inline), _) => inline.clone(),
                (None, Some(rel)) => std::fs::read_to_string(base_dir.join(rel))?,
                (None, None) => {
                    log::warn!("Manifest page {} has no html content", entry.pub_url);
                    String::new()
                }
            };
            pages.push(PageInput {
                html,
                component: entry.component.clone(),
                version: entry.version.clone(),
                stem: entry.stem.clone(),
                pub_url: entry.pub_url.clone(),
            });
        }
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_parses_with_defaults() {
        let manifest: Manifest = serde_json::from_str("{}").expect("parse");
        assert!(manifest.site.base_url().is_none());
        assert!(manifest.pages.is_empty());
    }

    #[test]
    fn test_inline_html_wins_over_path() {
        let manifest: Manifest = serde_json::from_str(
            r#"{
                "site": {"url": "https://ex.com"},
                "pages": [{
                    "component": "c", "version": "1", "stem": "p",
                    "pub_url": "/c/1/p.html",
                    "html": "<article class=\"doc\"></article>",
                    "html_path": "does-not-exist.html"
                }]
            }"#,
        )
        .expect("parse");
        let pages = manifest
            .resolve_pages(Path::new("/nonexistent"))
            .expect("resolve");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].html, "<article class=\"doc\"></article>");
    }

    #[test]
    fn test_html_path_resolved_relative_to_base_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("page.html"), "<article class=\"doc\"/>")
            .expect("write fixture");
        let manifest: Manifest = serde_json::from_str(
            r#"{
                "pages": [{
                    "component": "c", "version": "1", "stem": "p",
                    "pub_url": "/c/1/p.html",
                    "html_path": "page.html"
                }]
            }"#,
        )
        .expect("parse");
        let pages = manifest.resolve_pages(dir.path()).expect("resolve");
        assert_eq!(pages[0].html, "<article class=\"doc\"/>");
    }
}
