//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use st_site::SiteError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Malformed request.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Page generation failed.
    #[error("Site error: {0}")]
    Site(#[from] SiteError),

    /// A blocking generation task panicked or was cancelled.
    #[error("Generation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Invalid listen address.
    #[error("Invalid address: {0}")]
    Address(#[from] std::net::AddrParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Site(_) | Self::Task(_) | Self::Address(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, axum::Json(json!({"error": self.to_string()}))).into_response()
    }
}
