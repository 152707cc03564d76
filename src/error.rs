//! Error types for the finance dashboard client.

/// All errors that can occur when talking to the finance backend or
/// managing the session.
#[derive(Debug, thiserror::Error)]
pub enum FinanceError {
    /// The HTTP request could not be built, sent or read.
    #[cfg(any(feature = "async", feature = "blocking"))]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error detail reported by the backend.
        message: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The configured base URL is not a valid URL.
    #[cfg(any(feature = "async", feature = "blocking"))]
    #[error("invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Token storage backend failed.
    #[error("token storage error: {0}")]
    TokenStorage(Box<dyn core::error::Error + Send + Sync>),

    /// No access token is loaded in the session.
    #[error("no access token available; log in first")]
    MissingToken,

    /// A record failed client-side validation before submission.
    #[error("validation error: {0}")]
    Validation(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, FinanceError>;
