//! Error types for index generation
//!
//! Extraction is infallible by design (malformed pages degrade to empty
//! fields), so errors only arise while packaging the artifact.

use thiserror::Error;

/// Result type alias for index generation operations
pub type IndexGenResult<T> = Result<T, IndexGenError>;

/// Error types for index generation and artifact packaging
#[derive(Debug, Error)]
pub enum IndexGenError {
    /// JSON serialization or parsing failed (index payload or manifest)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Gzip compression of the artifact payload failed
    #[error("Failed to compress search index artifact: {0}")]
    Compress(#[source] std::io::Error),

    /// Gzip decompression of an artifact payload failed
    #[error("Failed to decompress search index artifact: {0}")]
    Decompress(#[source] std::io::Error),

    /// Artifact payload length is not a whole number of UTF-16 code units
    #[error("Artifact payload truncated: {0} bytes is not a multiple of 2")]
    TruncatedPayload(usize),

    /// Artifact payload decoded to invalid UTF-16
    #[error("Artifact payload is not valid UTF-16: {0}")]
    Utf16(#[from] std::string::FromUtf16Error),

    /// Writing the artifact file to disk failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
