//! Error types for the extractor crate.
//!
//! Extraction itself is infallible; these cover writing the dataset files.

use thiserror::Error;

/// Errors that can occur while writing dataset files.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
