//! Document search operations.

use tracing::{debug, info};

use super::PrismicClient;
use crate::error::ContentError;
use crate::predicate::{self, Predicate};
use crate::source::{ContentSource, DocumentQuery, Ordering, Revision};
use crate::types::{Document, QueryPage};

/// Options of a single search request.
struct SearchRequest<'a> {
    predicates: &'a [Predicate],
    ordering: Option<&'a Ordering>,
    page_size: u32,
    page: u32,
    after: Option<&'a str>,
}

/// Build query parameters for the search endpoint.
fn search_params(reference: &str, request: &SearchRequest<'_>) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("ref", reference.to_owned()),
        ("q", predicate::encode(request.predicates)),
        ("pageSize", request.page_size.to_string()),
        ("page", request.page.to_string()),
    ];
    if let Some(ordering) = request.ordering {
        params.push(("orderings", ordering.encode()));
    }
    if let Some(after) = request.after {
        params.push(("after", after.to_owned()));
    }
    params
}

impl PrismicClient {
    /// Run a search against the documents endpoint.
    fn search(
        &self,
        request: &SearchRequest<'_>,
        revision: &Revision,
    ) -> Result<QueryPage, ContentError> {
        let reference = self.resolve_ref(revision)?;
        let url = format!("{}/documents/search", self.endpoint);
        let params = search_params(&reference, request);

        debug!(
            q = %predicate::encode(request.predicates),
            draft = revision.is_draft(),
            "Searching documents"
        );

        let page: QueryPage = self.get_json(&url, &params)?;
        debug!(
            results = page.results_size,
            total = page.total_results_size,
            "Search completed"
        );
        Ok(page)
    }

    /// Search for at most one document.
    fn search_one(
        &self,
        predicates: &[Predicate],
        revision: &Revision,
    ) -> Result<Option<Document>, ContentError> {
        let request = SearchRequest {
            predicates,
            ordering: None,
            page_size: 1,
            page: 1,
            after: None,
        };
        Ok(self.search(&request, revision)?.results.into_iter().next())
    }
}

impl ContentSource for PrismicClient {
    fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &str,
        revision: &Revision,
    ) -> Result<Option<Document>, ContentError> {
        info!(
            doc_type,
            uid,
            draft = revision.is_draft(),
            "Fetching document by UID"
        );
        self.search_one(
            &[Predicate::Uid {
                doc_type: doc_type.to_owned(),
                uid: uid.to_owned(),
            }],
            revision,
        )
    }

    fn get_by_id(&self, id: &str, revision: &Revision) -> Result<Option<Document>, ContentError> {
        info!(id, draft = revision.is_draft(), "Fetching document by ID");
        self.search_one(&[Predicate::DocumentId(id.to_owned())], revision)
    }

    fn query(&self, query: &DocumentQuery) -> Result<QueryPage, ContentError> {
        let predicates = [Predicate::DocumentType(query.doc_type.clone())];
        let request = SearchRequest {
            predicates: &predicates,
            ordering: query.ordering.as_ref(),
            page_size: query.page_size,
            page: query.page,
            after: query.after.as_deref(),
        };
        self.search(&request, &query.revision)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::source::OrderField;

    #[test]
    fn test_search_params_minimal() {
        let predicates = [Predicate::DocumentType("post".to_owned())];
        let request = SearchRequest {
            predicates: &predicates,
            ordering: None,
            page_size: 20,
            page: 1,
            after: None,
        };

        assert_eq!(
            search_params("master-ref", &request),
            vec![
                ("ref", "master-ref".to_owned()),
                ("q", r#"[[at(document.type, "post")]]"#.to_owned()),
                ("pageSize", "20".to_owned()),
                ("page", "1".to_owned()),
            ]
        );
    }

    #[test]
    fn test_search_params_neighbor_query() {
        let predicates = [Predicate::DocumentType("post".to_owned())];
        let ordering = Ordering::descending(OrderField::FirstPublicationDate);
        let request = SearchRequest {
            predicates: &predicates,
            ordering: Some(&ordering),
            page_size: 1,
            page: 1,
            after: Some("YEt1BxIAACMA0Hzd"),
        };

        let params = search_params("master-ref", &request);
        assert!(params.contains(&("pageSize", "1".to_owned())));
        assert!(params.contains(&(
            "orderings",
            "[document.first_publication_date desc]".to_owned()
        )));
        assert!(params.contains(&("after", "YEt1BxIAACMA0Hzd".to_owned())));
    }
}
