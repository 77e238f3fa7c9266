//! In-memory page cache.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use tracing::debug;

use crate::guard::{InFlight, RegenerationGuard};
use crate::{CacheLookup, CachedPage, PageCache};

/// [`PageCache`] held in process memory.
///
/// Entries older than `revalidate_after` are returned as
/// [`CacheLookup::Stale`]. Entries are never evicted by age alone; a stale
/// page stays servable until a regeneration replaces it.
pub struct MemoryPageCache {
    revalidate_after: Duration,
    entries: RwLock<HashMap<String, CachedPage>>,
    in_flight: InFlight,
}

impl MemoryPageCache {
    #[must_use]
    pub fn new(revalidate_after: Duration) -> Self {
        Self {
            revalidate_after,
            entries: RwLock::new(HashMap::new()),
            in_flight: InFlight::default(),
        }
    }

    /// Number of stored pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PageCache for MemoryPageCache {
    fn lookup(&self, key: &str) -> CacheLookup {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let Some(page) = entries.get(key) else {
            return CacheLookup::Miss;
        };

        // A clock that went backwards counts as fresh
        let age = page.generated_at.elapsed().unwrap_or_default();
        if age < self.revalidate_after {
            CacheLookup::Fresh(page.clone())
        } else {
            debug!(key, age_secs = age.as_secs(), "Cached page is stale");
            CacheLookup::Stale(page.clone())
        }
    }

    fn store(&self, key: &str, page: CachedPage) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), page);
    }

    fn invalidate(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    fn try_begin_regeneration(&self, key: &str) -> Option<RegenerationGuard> {
        RegenerationGuard::acquire(&self.in_flight, key)
    }
}
