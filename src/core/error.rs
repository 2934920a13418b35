//! Custom error types for the application.
//!
//! - [`FetchError`] - Network/fetch-related errors for HTTP requests
//! - [`ConfigLoadError`] - Startup failure loading the site configuration
//! - [`RouteDecodeError`] - Location fragment that cannot be decoded
//! - [`StorageError`] - localStorage operations for UI preferences

use thiserror::Error;

/// Network/fetch-related errors for HTTP requests.
///
/// Recoverable: scoped to the single directory or document being loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (CORS, offline, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    #[error("HTTP error: {0}")]
    HttpError(u16),
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Invalid response content (not text)
    #[error("Invalid response content")]
    InvalidContent,
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParseError(String),
}

/// The site configuration could not be loaded. Fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigLoadError {
    #[error("Failed to load config.json: {0}")]
    Fetch(#[from] FetchError),
    #[error("config.json is missing `{0}`")]
    MissingField(&'static str),
}

/// The location fragment could not be percent-decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteDecodeError {
    #[error("route is not valid percent-encoded UTF-8")]
    InvalidEncoding,
}

/// localStorage errors for preference persistence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// localStorage not available.
    #[error("localStorage not available")]
    StorageUnavailable,
    /// Failed to save to localStorage.
    #[error("failed to save to localStorage")]
    WriteFailed,
}
