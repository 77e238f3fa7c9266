//! Content source trait and query types.
//!
//! Page code depends on two query shapes only:
//! - fetch one document by type and identifier, optionally at a draft ref
//! - fetch documents by type, ordered by a field, bounded to N results,
//!   after a given cursor
//!
//! A third lookup by internal ID exists solely to resolve preview links.

use crate::error::ContentError;
use crate::types::{Document, QueryPage};

/// Which revision of the repository to read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Revision {
    /// The live, published content.
    #[default]
    Published,
    /// Unpublished draft content identified by a preview ref.
    Draft(String),
}

impl Revision {
    /// Create a revision from an optional preview token.
    #[must_use]
    pub fn from_preview_token(token: Option<&str>) -> Self {
        match token {
            Some(token) if !token.is_empty() => Self::Draft(token.to_owned()),
            _ => Self::Published,
        }
    }

    /// Whether this revision reads draft content.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft(_))
    }
}

/// Document field a query can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    FirstPublicationDate,
    LastPublicationDate,
}

impl OrderField {
    /// Field path as understood by the content API.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstPublicationDate => "document.first_publication_date",
            Self::LastPublicationDate => "document.last_publication_date",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering {
    pub field: OrderField,
    pub direction: SortDirection,
}

impl Ordering {
    /// Ascending ordering on `field`.
    #[must_use]
    pub fn ascending(field: OrderField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    /// Descending ordering on `field`.
    #[must_use]
    pub fn descending(field: OrderField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }

    /// Encode as an `orderings` query parameter (e.g. `[document.first_publication_date desc]`).
    #[must_use]
    pub fn encode(&self) -> String {
        match self.direction {
            SortDirection::Ascending => format!("[{}]", self.field.as_str()),
            SortDirection::Descending => format!("[{} desc]", self.field.as_str()),
        }
    }
}

/// Default page size used by the content API.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size accepted by the content API.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query for documents of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentQuery {
    /// Custom type to match.
    pub doc_type: String,
    /// Result ordering (API default when `None`).
    pub ordering: Option<Ordering>,
    /// Maximum results per page (1..=100).
    pub page_size: u32,
    /// Page number (1-based).
    pub page: u32,
    /// Only return documents after this document ID in the given ordering.
    pub after: Option<String>,
    /// Repository revision to read.
    pub revision: Revision,
}

impl DocumentQuery {
    /// Query all documents of `doc_type` with API defaults.
    #[must_use]
    pub fn by_type(doc_type: impl Into<String>) -> Self {
        Self {
            doc_type: doc_type.into(),
            ordering: None,
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
            after: None,
            revision: Revision::Published,
        }
    }

    /// Set the result ordering.
    #[must_use]
    pub fn ordered_by(mut self, ordering: Ordering) -> Self {
        self.ordering = Some(ordering);
        self
    }

    /// Set the page size, clamped to `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Set the page number (pages start at 1).
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Only return documents after `id` in the query ordering.
    #[must_use]
    pub fn after(mut self, id: impl Into<String>) -> Self {
        self.after = Some(id.into());
        self
    }

    /// Read from the given revision.
    #[must_use]
    pub fn revision(mut self, revision: Revision) -> Self {
        self.revision = revision;
        self
    }
}

/// Read-only access to a headless content repository.
///
/// Implementations must be safe to call from several threads at once; the
/// page loader issues neighbor queries concurrently.
pub trait ContentSource: Send + Sync {
    /// Fetch the document of `doc_type` whose identifier is `uid`.
    ///
    /// Returns `Ok(None)` when no such document exists at `revision`.
    fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &str,
        revision: &Revision,
    ) -> Result<Option<Document>, ContentError>;

    /// Fetch a document by its internal ID.
    fn get_by_id(&self, id: &str, revision: &Revision) -> Result<Option<Document>, ContentError>;

    /// Run a typed, ordered, paginated query.
    fn query(&self, query: &DocumentQuery) -> Result<QueryPage, ContentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_encode() {
        assert_eq!(
            Ordering::ascending(OrderField::FirstPublicationDate).encode(),
            "[document.first_publication_date]"
        );
        assert_eq!(
            Ordering::descending(OrderField::FirstPublicationDate).encode(),
            "[document.first_publication_date desc]"
        );
        assert_eq!(
            Ordering::descending(OrderField::LastPublicationDate).encode(),
            "[document.last_publication_date desc]"
        );
    }

    #[test]
    fn test_revision_from_preview_token() {
        assert_eq!(Revision::from_preview_token(None), Revision::Published);
        assert_eq!(Revision::from_preview_token(Some("")), Revision::Published);
        assert_eq!(
            Revision::from_preview_token(Some("https://repo.prismic.io/previews/abc")),
            Revision::Draft("https://repo.prismic.io/previews/abc".to_owned())
        );
        assert!(Revision::Draft("x".to_owned()).is_draft());
        assert!(!Revision::Published.is_draft());
    }

    #[test]
    fn test_query_builder_clamps_values() {
        let query = DocumentQuery::by_type("post").page_size(0).page(0);
        assert_eq!(query.page_size, 1);
        assert_eq!(query.page, 1);

        let query = DocumentQuery::by_type("post").page_size(500);
        assert_eq!(query.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_query_builder_defaults() {
        let query = DocumentQuery::by_type("post");
        assert_eq!(query.doc_type, "post");
        assert_eq!(query.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(query.page, 1);
        assert!(query.ordering.is_none());
        assert!(query.after.is_none());
        assert_eq!(query.revision, Revision::Published);
    }
}
