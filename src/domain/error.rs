//! Error types for the Mortydex plugin.
//!
//! This module defines the centralized error type [`BrowserError`] and a type alias
//! [`Result`] used throughout the plugin. Fetch failures never reach the user as
//! errors: the client layer folds them into an empty page. The variants here exist
//! so that the folding point can log what actually went wrong.

use thiserror::Error;

/// The main error type for Mortydex operations.
///
/// # Examples
///
/// ```
/// use mortydex::BrowserError;
///
/// let err = BrowserError::Status(404);
/// assert_eq!(err.to_string(), "API responded with status 404");
/// ```
#[derive(Debug, Error)]
pub enum BrowserError {
    /// The character API answered with a non-success HTTP status.
    ///
    /// The API uses `404` for "no characters match this name", so this variant
    /// is part of normal operation rather than a fault.
    #[error("API responded with status {0}")]
    Status(u16),

    /// The response body was not the expected JSON document.
    #[error("Failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured API endpoint is not a valid URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A web request result carried a context that does not describe one of
    /// our fetches.
    #[error("Malformed request context: {0}")]
    Context(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// A specialized `Result` type for Mortydex operations.
pub type Result<T> = std::result::Result<T, BrowserError>;
