//! Static path enumeration.

use std::collections::BTreeSet;

use st_content::{ContentError, ContentSource, DocumentQuery, OrderField, Ordering};
use tracing::{debug, info};

/// Page size used when listing every post.
pub const PATHS_PAGE_SIZE: u32 = 100;

/// What happens to slugs that were not enumerated ahead of time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Generate the page on first request.
    #[default]
    OnDemand,
    /// Respond with not-found.
    Reject,
}

impl FallbackPolicy {
    /// Whether unknown slugs are generated on demand.
    #[must_use]
    pub fn allows_unknown(self) -> bool {
        matches!(self, Self::OnDemand)
    }
}

/// Routable post slugs plus the policy for everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticPaths {
    pub slugs: BTreeSet<String>,
    pub fallback: FallbackPolicy,
}

impl StaticPaths {
    /// Whether `slug` was enumerated.
    #[must_use]
    pub fn contains(&self, slug: &str) -> bool {
        self.slugs.contains(slug)
    }

    /// Route of every enumerated post, in slug order.
    pub fn routes(&self) -> impl Iterator<Item = String> + '_ {
        self.slugs.iter().map(|slug| post_route(slug))
    }

    /// Number of enumerated posts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    /// Whether no post was enumerated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }
}

/// Route path of a post.
#[must_use]
pub fn post_route(slug: &str) -> String {
    format!("/post/{slug}")
}

/// List the slug of every published document of `doc_type`.
///
/// Walks every result page. Documents without a UID are not routable and
/// are skipped.
///
/// # Errors
///
/// Returns [`ContentError`] if any page request fails.
pub fn enumerate_paths(
    source: &dyn ContentSource,
    doc_type: &str,
    fallback: FallbackPolicy,
) -> Result<StaticPaths, ContentError> {
    let base = DocumentQuery::by_type(doc_type)
        .ordered_by(Ordering::ascending(OrderField::FirstPublicationDate))
        .page_size(PATHS_PAGE_SIZE);

    let mut slugs = BTreeSet::new();
    let mut page = 1;
    loop {
        let result = source.query(&base.clone().page(page))?;
        debug!(page, results = result.results.len(), "Listed post page");

        let fetched = result.results.len();
        for document in result.results {
            match document.uid {
                Some(uid) if !uid.is_empty() => {
                    slugs.insert(uid);
                }
                _ => debug!(id = %document.id, "Skipping document without UID"),
            }
        }

        if fetched == 0 || page >= result.total_pages {
            break;
        }
        page += 1;
    }

    info!(doc_type, count = slugs.len(), "Enumerated static paths");
    Ok(StaticPaths { slugs, fallback })
}
