//! Artifact packaging: serialize, encode and compress the search index.
//!
//! The browser-side search client inflates the artifact and decodes the
//! payload as 16-bit code units, so the JSON text is re-encoded as
//! UTF-16LE (two bytes per code unit, full code unit values preserved)
//! before gzip compression. UTF-8 would not round-trip through that
//! client-side decode.

use crate::assembler::SearchIndex;
use crate::errors::{IndexGenError, IndexGenResult};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Fixed asset descriptor fields for the published artifact.
pub const ARTIFACT_MEDIA_TYPE: &str = "application/gzip";
pub const ARTIFACT_SRC_STEM: &str = "search_index";
pub const ARTIFACT_OUT_PATH: &str = "search_index.json.gz";
pub const ARTIFACT_PUB_URL: &str = "/search_index.json.gz";
pub const ARTIFACT_PUB_ROOT_PATH: &str = "";

/// File-asset descriptor for the compressed search index.
///
/// Every field except `contents` is fixed: the artifact always publishes
/// to the same path with the same media type.
#[derive(Debug, Clone)]
pub struct SearchIndexAsset {
    pub media_type: &'static str,
    pub contents: Vec<u8>,
    pub src_stem: &'static str,
    pub out_path: &'static str,
    pub pub_url: &'static str,
    pub pub_root_path: &'static str,
}

impl SearchIndexAsset {
    fn new(contents: Vec<u8>) -> Self {
        Self {
            media_type: ARTIFACT_MEDIA_TYPE,
            contents,
            src_stem: ARTIFACT_SRC_STEM,
            out_path: ARTIFACT_OUT_PATH,
            pub_url: ARTIFACT_PUB_URL,
            pub_root_path: ARTIFACT_PUB_ROOT_PATH,
        }
    }
}

/// Package the assembled index as a compressed publishable asset.
///
/// Returns `Ok(None)` for the empty-index sentinel: a zero-page batch
/// produces no artifact at all.
pub fn build_artifact(index: &SearchIndex) -> IndexGenResult<Option<SearchIndexAsset>> {
    if index.is_empty() {
        log::debug!("Empty search index, no artifact produced");
        return Ok(None);
    }

    let json = serde_json::to_string(index)?;
    let payload = encode_utf16_le(&json);
    let compressed = gzip(&payload)?;

    log::debug!(
        "Packaged search index artifact: {} JSON chars, {} compressed bytes",
        json.len(),
        compressed.len()
    );

    Ok(Some(SearchIndexAsset::new(compressed)))
}

/// Decode an artifact's bytes back into the pre-compression JSON value.
///
/// This is the exact inverse of [`build_artifact`]'s payload transform
/// (gunzip, then UTF-16LE decode, then JSON parse) and mirrors what the
/// browser client does after fetching the asset.
pub fn decode_artifact(contents: &[u8]) -> IndexGenResult<serde_json::Value> {
    let mut decoder = GzDecoder::new(contents);
    let mut payload = Vec::new();
    decoder
        .read_to_end(&mut payload)
        .map_err(IndexGenError::Decompress)?;
    let json = decode_utf16_le(&payload)?;
    Ok(serde_json::from_str(&json)?)
}

/// Write the artifact into `dir` at its fixed output path, atomically
/// (temp file in the same directory, then persist).
pub fn write_artifact(asset: &SearchIndexAsset, dir: &Path) -> IndexGenResult<PathBuf> {
    let target = dir.join(asset.out_path);
    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(&asset.contents)?;
    temp_file
        .persist(&target)
        .map_err(|e| IndexGenError::Io(e.error))?;
    log::info!("Wrote search index artifact to {}", target.display());
    Ok(target)
}

/// Encode text as UTF-16LE, two bytes per code unit.
fn encode_utf16_le(text: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(text.len() * 2);
    for unit in text.encode_utf16() {
        buf.extend_from_slice(&unit.to_le_bytes());
    }
    buf
}

/// Decode a UTF-16LE byte buffer back into text.
fn decode_utf16_le(bytes: &[u8]) -> IndexGenResult<String> {
    if bytes.len() % 2 != 0 {
        return Err(IndexGenError::TruncatedPayload(bytes.len()));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    Ok(String::from_utf16(&units)?)
}

/// Gzip-compress a byte buffer at the default compression level.
fn gzip(payload: &[u8]) -> IndexGenResult<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(payload).map_err(IndexGenError::Compress)?;
    encoder.finish().map_err(IndexGenError::Compress)
}
