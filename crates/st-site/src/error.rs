use std::io;
use std::path::PathBuf;

use st_content::ContentError;

/// Error returned when a page cannot be generated.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("Content source error: {0}")]
    Content(#[from] ContentError),
}

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Site(#[from] SiteError),
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to encode paths manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
