//! Error types for content access.

/// Error from content API operations.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Endpoint URL is not usable.
    #[error("invalid content endpoint: {0}")]
    InvalidEndpoint(String),

    /// The repository did not report a master ref.
    #[error("content repository has no master ref")]
    MissingMasterRef,

    /// Source is unavailable (used by in-memory sources).
    #[error("content source unavailable: {0}")]
    Unavailable(String),
}
