//! Advisory service error types.

/// Errors that can occur when asking the advisory service for commentary.
#[derive(Debug, thiserror::Error)]
pub enum AdvisoryError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check ADVISORY_API_KEY")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The service answered with nothing to say
    #[error("advisory service returned an empty reply")]
    EmptyReply,
}
