//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;
use std::time::Duration;

use st_cache::PageCache;
use st_post::StaticPaths;
use st_site::Site;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Page generation.
    pub(crate) site: Arc<Site>,
    /// Generated published pages.
    pub(crate) cache: Arc<dyn PageCache>,
    /// Routes enumerated at startup, if enumeration ran.
    pub(crate) known_paths: Option<StaticPaths>,
    /// Application version, part of every `ETag`.
    pub(crate) version: String,
}

impl AppState {
    /// Whether `slug` may be generated.
    pub(crate) fn accepts(&self, slug: &str) -> bool {
        self.site.config().fallback.allows_unknown()
            || self
                .known_paths
                .as_ref()
                .is_some_and(|paths| paths.contains(slug))
    }

    pub(crate) fn revalidate(&self) -> Duration {
        self.site.config().revalidate
    }
}
