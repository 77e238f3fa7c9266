//! In-memory content source for testing.
//!
//! Provides [`MockContentSource`] for unit testing without network access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::ContentError;
use crate::source::{ContentSource, DocumentQuery, OrderField, Revision, SortDirection};
use crate::types::{Document, QueryPage};

/// Kind of call recorded by [`MockContentSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    GetByUid { uid: String, revision: Revision },
    GetById { id: String, revision: Revision },
    Query(DocumentQuery),
}

/// Mock content source for testing.
///
/// Holds published documents plus per-ref draft overlays. A draft ref sees the
/// published documents with its drafts replacing documents of the same ID.
/// Every call is recorded so tests can assert which revision was requested.
///
/// # Example
///
/// ```ignore
/// use st_content::{ContentSource, Document, MockContentSource, Revision};
///
/// let source = MockContentSource::new()
///     .with_document(Document::new("A", "post").with_uid("first"));
///
/// let doc = source.get_by_uid("post", "first", &Revision::Published)?;
/// ```
#[derive(Debug, Default)]
pub struct MockContentSource {
    published: RwLock<Vec<Document>>,
    drafts: RwLock<HashMap<String, Vec<Document>>>,
    calls: RwLock<Vec<MockCall>>,
    failure: RwLock<Option<String>>,
}

impl MockContentSource {
    /// Create a new empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a published document.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_document(self, document: Document) -> Self {
        self.published.write().unwrap().push(document);
        self
    }

    /// Add a draft document visible only through `preview_ref`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_draft(self, preview_ref: impl Into<String>, document: Document) -> Self {
        self.drafts
            .write()
            .unwrap()
            .entry(preview_ref.into())
            .or_default()
            .push(document);
        self
    }

    /// Make every subsequent call fail with [`ContentError::Unavailable`].
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write().unwrap() = Some(message.into());
    }

    /// Calls received so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.read().unwrap().clone()
    }

    /// Clear recorded calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }

    fn record(&self, call: MockCall) -> Result<(), ContentError> {
        self.calls.write().unwrap().push(call);
        match self.failure.read().unwrap().as_ref() {
            Some(message) => Err(ContentError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }

    /// Documents visible at `revision`.
    fn visible(&self, revision: &Revision) -> Vec<Document> {
        let mut documents = self.published.read().unwrap().clone();
        if let Revision::Draft(preview_ref) = revision
            && let Some(drafts) = self.drafts.read().unwrap().get(preview_ref)
        {
            for draft in drafts {
                match documents.iter_mut().find(|d| d.id == draft.id) {
                    Some(existing) => *existing = draft.clone(),
                    None => documents.push(draft.clone()),
                }
            }
        }
        documents
    }
}

fn order_key(document: &Document, field: OrderField) -> &str {
    let value = match field {
        OrderField::FirstPublicationDate => &document.first_publication_date,
        OrderField::LastPublicationDate => &document.last_publication_date,
    };
    value.as_deref().unwrap_or_default()
}

impl ContentSource for MockContentSource {
    fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &str,
        revision: &Revision,
    ) -> Result<Option<Document>, ContentError> {
        self.record(MockCall::GetByUid {
            uid: uid.to_owned(),
            revision: revision.clone(),
        })?;
        Ok(self
            .visible(revision)
            .into_iter()
            .find(|d| d.doc_type == doc_type && d.uid.as_deref() == Some(uid)))
    }

    fn get_by_id(&self, id: &str, revision: &Revision) -> Result<Option<Document>, ContentError> {
        self.record(MockCall::GetById {
            id: id.to_owned(),
            revision: revision.clone(),
        })?;
        Ok(self.visible(revision).into_iter().find(|d| d.id == id))
    }

    /// Filters by type, sorts, applies the `after` cursor, then paginates.
    ///
    /// A cursor that names an unknown document yields no results.
    fn query(&self, query: &DocumentQuery) -> Result<QueryPage, ContentError> {
        self.record(MockCall::Query(query.clone()))?;

        let mut matching: Vec<Document> = self
            .visible(&query.revision)
            .into_iter()
            .filter(|d| d.doc_type == query.doc_type)
            .collect();

        if let Some(ordering) = query.ordering {
            matching.sort_by(|a, b| {
                let ord = order_key(a, ordering.field).cmp(order_key(b, ordering.field));
                match ordering.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }

        if let Some(cursor) = &query.after {
            matching = match matching.iter().position(|d| &d.id == cursor) {
                Some(index) => matching.split_off(index + 1),
                None => Vec::new(),
            };
        }

        let page_size = query.page_size.max(1) as usize;
        let total = matching.len();
        let total_pages = total.div_ceil(page_size);
        let results: Vec<Document> = matching
            .into_iter()
            .skip((query.page.max(1) as usize - 1) * page_size)
            .take(page_size)
            .collect();

        let next_page = (query.page as usize) < total_pages;
        Ok(QueryPage {
            page: query.page,
            results_per_page: query.page_size,
            results_size: u32::try_from(results.len()).unwrap_or(u32::MAX),
            total_results_size: u32::try_from(total).unwrap_or(u32::MAX),
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
            next_page: next_page.then(|| format!("mock://page/{}", query.page + 1)),
            results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Ordering;

    fn post(id: &str, uid: &str, created: &str) -> Document {
        Document::new(id, "post")
            .with_uid(uid)
            .with_dates(created, created)
    }

    fn source() -> MockContentSource {
        MockContentSource::new()
            .with_document(post("B", "second", "2021-02-01T00:00:00+0000"))
            .with_document(post("A", "first", "2021-01-01T00:00:00+0000"))
            .with_document(post("C", "third", "2021-03-01T00:00:00+0000"))
            .with_document(Document::new("P", "page").with_uid("about"))
    }

    fn ids(page: &QueryPage) -> Vec<&str> {
        page.results.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_get_by_uid_filters_type() {
        let source = source();
        assert!(
            source
                .get_by_uid("post", "about", &Revision::Published)
                .unwrap()
                .is_none()
        );
        let doc = source
            .get_by_uid("post", "second", &Revision::Published)
            .unwrap()
            .unwrap();
        assert_eq!(doc.id, "B");
    }

    #[test]
    fn test_query_orders_and_paginates() {
        let source = source();
        let query = DocumentQuery::by_type("post")
            .ordered_by(Ordering::ascending(OrderField::FirstPublicationDate))
            .page_size(2);

        let first = source.query(&query).unwrap();
        assert_eq!(ids(&first), vec!["A", "B"]);
        assert_eq!(first.total_pages, 2);
        assert!(first.next_page.is_some());

        let second = source.query(&query.clone().page(2)).unwrap();
        assert_eq!(ids(&second), vec!["C"]);
        assert!(second.next_page.is_none());
    }

    #[test]
    fn test_query_after_cursor() {
        let source = source();
        let desc = DocumentQuery::by_type("post")
            .ordered_by(Ordering::descending(OrderField::FirstPublicationDate))
            .page_size(1)
            .after("B");
        assert_eq!(ids(&source.query(&desc).unwrap()), vec!["A"]);

        let unknown = DocumentQuery::by_type("post").after("missing");
        assert!(source.query(&unknown).unwrap().results.is_empty());
    }

    #[test]
    fn test_draft_overlays_published() {
        let edited = post("B", "second", "2021-02-01T00:00:00+0000").with_data(
            crate::types::PostData {
                title: "Draft title".to_owned(),
                ..Default::default()
            },
        );
        let source = source().with_draft("preview-1", edited);

        let published = source
            .get_by_uid("post", "second", &Revision::Published)
            .unwrap()
            .unwrap();
        assert_eq!(published.data.title, "");

        let draft = source
            .get_by_uid("post", "second", &Revision::Draft("preview-1".to_owned()))
            .unwrap()
            .unwrap();
        assert_eq!(draft.data.title, "Draft title");
    }

    #[test]
    fn test_calls_are_recorded() {
        let source = source();
        let _ = source.get_by_uid("post", "first", &Revision::Published);
        let _ = source.get_by_id("A", &Revision::Draft("r".to_owned()));

        assert_eq!(
            source.calls(),
            vec![
                MockCall::GetByUid {
                    uid: "first".to_owned(),
                    revision: Revision::Published,
                },
                MockCall::GetById {
                    id: "A".to_owned(),
                    revision: Revision::Draft("r".to_owned()),
                },
            ]
        );
    }

    #[test]
    fn test_failure_mode() {
        let source = source();
        source.fail_with("maintenance");
        let err = source
            .get_by_uid("post", "first", &Revision::Published)
            .unwrap_err();
        assert!(matches!(err, ContentError::Unavailable(ref m) if m == "maintenance"));
    }
}
