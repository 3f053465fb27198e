//! Error types for the blog engine.
//!
//! This module defines the centralized error type [`BlogError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.
//!
//! Most failures in the engine are recoverable and never surface as errors:
//! malformed article metadata falls back to defaults and selection misses become
//! notifications. `BlogError` covers the failures that must be reported to a
//! caller: an unreadable content source, preference storage I/O, and invalid
//! configuration.

use thiserror::Error;

/// The main error type for blog engine operations.
///
/// # Examples
///
/// ```
/// use techblog::BlogError;
///
/// fn read_source() -> Result<(), BlogError> {
///     Err(BlogError::Content("content directory missing".to_string()))
/// }
///
/// assert!(read_source().is_err());
/// ```
#[derive(Debug, Error)]
pub enum BlogError {
    /// The content source could not be read as a whole.
    ///
    /// Raised by [`ContentSource`](crate::content::ContentSource)
    /// implementations. A single malformed article never produces this error.
    #[error("Content error: {0}")]
    Content(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Preference storage failed to read or write its document.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Theme preference value is not one of the recognized modes.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The content worker reported a failure for a request.
    ///
    /// Carries the worker's message verbatim since the original error does
    /// not cross the message boundary.
    #[error("Worker error: {0}")]
    Worker(String),
}

/// A specialized `Result` type for blog engine operations.
pub type Result<T> = std::result::Result<T, BlogError>;
