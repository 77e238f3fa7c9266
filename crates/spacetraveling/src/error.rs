//! CLI error types.

use st_config::ConfigError;
use st_content::ContentError;
use st_post::DateError;
use st_site::{BuildError, SiteError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Content(#[from] ContentError),

    #[error("{0}")]
    Locale(#[from] DateError),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Server(String),
}
