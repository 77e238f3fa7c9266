//! Revalidating page cache for spacetraveling.
//!
//! Generated pages are kept for a revalidation interval. After that they are
//! still served, marked stale, while one regeneration per key runs in the
//! background. The [`PageCache`] trait decouples the server from the storage:
//!
//! - [`NullPageCache`]: no-op implementation (always misses)
//! - [`MemoryPageCache`]: in-process map with time-based staleness
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use st_cache::{CacheLookup, CachedPage, MemoryPageCache, PageCache};
//!
//! let cache = MemoryPageCache::new(Duration::from_secs(1800));
//! cache.store("hello-world", CachedPage::new("<html></html>", "\"abc\""));
//! assert!(matches!(cache.lookup("hello-world"), CacheLookup::Fresh(_)));
//! ```

mod guard;
mod memory;

use std::sync::Arc;
use std::time::SystemTime;

pub use guard::RegenerationGuard;
pub use memory::MemoryPageCache;

/// A rendered page with its validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedPage {
    pub html: Arc<str>,
    /// Quoted entity tag, ready for the `ETag` header.
    pub etag: String,
    pub generated_at: SystemTime,
}

impl CachedPage {
    /// Page generated now.
    #[must_use]
    pub fn new(html: impl Into<Arc<str>>, etag: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            etag: etag.into(),
            generated_at: SystemTime::now(),
        }
    }
}

/// Result of a cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// Within the revalidation interval.
    Fresh(CachedPage),
    /// Past the revalidation interval. Serve it and regenerate.
    Stale(CachedPage),
    Miss,
}

/// Store of generated pages keyed by route.
pub trait PageCache: Send + Sync {
    /// Look up a page.
    fn lookup(&self, key: &str) -> CacheLookup;

    /// Store or replace a page.
    fn store(&self, key: &str, page: CachedPage);

    /// Drop a page so the next request regenerates it.
    fn invalidate(&self, key: &str);

    /// Claim the right to regenerate `key`.
    ///
    /// Returns `None` while another holder's guard for the same key is alive.
    fn try_begin_regeneration(&self, key: &str) -> Option<RegenerationGuard>;
}

/// No-op [`PageCache`]: every lookup misses and every regeneration is
/// granted.
///
/// Use when caching is disabled.
pub struct NullPageCache;

impl PageCache for NullPageCache {
    fn lookup(&self, _key: &str) -> CacheLookup {
        CacheLookup::Miss
    }

    fn store(&self, _key: &str, _page: CachedPage) {}

    fn invalidate(&self, _key: &str) {}

    fn try_begin_regeneration(&self, _key: &str) -> Option<RegenerationGuard> {
        Some(RegenerationGuard::untracked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_cache_always_misses() {
        let cache = NullPageCache;
        cache.store("key", CachedPage::new("<p>hello</p>", "\"1\""));
        assert_eq!(cache.lookup("key"), CacheLookup::Miss);
    }

    #[test]
    fn test_null_cache_never_blocks_regeneration() {
        let cache = NullPageCache;
        let first = cache.try_begin_regeneration("key");
        let second = cache.try_begin_regeneration("key");
        assert!(first.is_some());
        assert!(second.is_some());
    }
}
