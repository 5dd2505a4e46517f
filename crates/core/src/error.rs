//! Error types for SchemaLens operations.
//!
//! Structured-data extraction itself never fails: malformed fragments are
//! skipped and reported through `tracing`. [`SchemaLensError`] covers the
//! fallible edges around the engine: fetching, file I/O, base URL parsing
//! and serialization.
//!
//! # Example
//!
//! ```rust
//! use schemalens_core::{SchemaLensError, Result};
//!
//! fn load(path: &str) -> Result<String> {
//!     if path.is_empty() {
//!         return Err(SchemaLensError::InvalidUrl("empty input".to_string()));
//!     }
//!     // ... read the page
//!     # Ok(String::new())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for SchemaLens operations.
///
/// # Example
///
/// ```rust
/// use schemalens_core::{SchemaLensError, inspect_with_url};
///
/// match inspect_with_url("<html></html>", "not a url") {
///     Ok(record) => println!("{} types", record.len()),
///     Err(SchemaLensError::InvalidUrl(reason)) => println!("bad base url: {}", reason),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum SchemaLensError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a page or base URL cannot be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors.
    ///
    /// In practice this is an invalid CSS selector handed to
    /// [`Document::select`](crate::Document::select).
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Reading a file or standard input failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A normalized record could not be serialized.
    #[error("Serialization failed: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for SchemaLensError {
    fn from(err: serde_json::Error) -> Self {
        SchemaLensError::SerializationError(err.to_string())
    }
}

/// Result type alias for SchemaLensError.
pub type Result<T> = std::result::Result<T, SchemaLensError>;
