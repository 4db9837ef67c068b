//! Error types for the Bhulekh extraction system.
//!
//! Content-quality problems (missing fields, malformed rows, absent tables)
//! are never surfaced as errors; they degrade to sentinel values and a lower
//! confidence score. The variants here cover genuine failures at the edges:
//! I/O, HTTP, storage, and internal selector bugs.

use thiserror::Error;

/// Error type shared across the bhulekh-rs crates.
#[derive(Error, Debug)]
pub enum BhulekhError {
    /// An internal CSS selector failed to compile. This indicates a bug in
    /// the engine, not a property of the input document.
    #[error("Selector error: {0}")]
    Selector(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport or status error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Prompt could not be obtained from the API or the local fallback.
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Record storage failure (unknown record id, backend error).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Translation collaborator failure.
    #[error("Translation error: {0}")]
    Translation(String),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias used throughout the bhulekh-rs crates.
pub type Result<T> = std::result::Result<T, BhulekhError>;
