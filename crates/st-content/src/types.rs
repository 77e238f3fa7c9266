//! Content API document types.

use serde::{Deserialize, Deserializer, Serialize};
use st_richtext::Block;

/// A document as returned by the content API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Document {
    /// Repository-internal document ID (used as query cursor).
    pub id: String,
    /// Human-readable identifier used in routes (the slug).
    #[serde(default)]
    pub uid: Option<String>,
    /// Custom type name (e.g. "post").
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Creation timestamp (ISO 8601). `None` for never-published drafts.
    #[serde(default)]
    pub first_publication_date: Option<String>,
    /// Last-modified timestamp (ISO 8601).
    #[serde(default)]
    pub last_publication_date: Option<String>,
    /// Post fields.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: PostData,
}

impl Document {
    /// Create a document with the given ID and type and empty fields.
    #[must_use]
    pub fn new(id: impl Into<String>, doc_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            uid: None,
            doc_type: doc_type.into(),
            first_publication_date: None,
            last_publication_date: None,
            data: PostData::default(),
        }
    }

    /// Set the document identifier.
    #[must_use]
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Set both publication timestamps.
    #[must_use]
    pub fn with_dates(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_publication_date = Some(first.into());
        self.last_publication_date = Some(last.into());
        self
    }

    /// Replace the post fields.
    #[must_use]
    pub fn with_data(mut self, data: PostData) -> Self {
        self.data = data;
        self
    }

    /// Document identifier, or an empty string when the document has none.
    #[must_use]
    pub fn slug(&self) -> &str {
        self.uid.as_deref().unwrap_or_default()
    }
}

/// Fields of the post custom type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PostData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub banner: Banner,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<ContentSection>,
}

/// Banner image reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Banner {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

/// One content section: a heading followed by rich text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContentSection {
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: Vec<Block>,
}

impl ContentSection {
    /// Create a section from a heading and body blocks.
    #[must_use]
    pub fn new(heading: impl Into<String>, body: Vec<Block>) -> Self {
        Self {
            heading: Some(heading.into()),
            body,
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct QueryPage {
    /// Page number (1-based).
    pub page: u32,
    /// Requested page size.
    pub results_per_page: u32,
    /// Number of results on this page.
    pub results_size: u32,
    /// Number of results across all pages.
    pub total_results_size: u32,
    /// Number of pages.
    pub total_pages: u32,
    /// URL of the next page, if any.
    pub next_page: Option<String>,
    /// Documents on this page.
    pub results: Vec<Document>,
}

/// Repository description returned by the API root.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiInfo {
    #[serde(default)]
    pub(crate) refs: Vec<ApiRef>,
}

/// Content release reference.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiRef {
    #[serde(rename = "ref")]
    pub(crate) reference: String,
    #[serde(rename = "isMasterRef", default)]
    pub(crate) is_master_ref: bool,
}

/// Treat an explicit JSON `null` like a missing field.
///
/// The API reports empty fields as `null` rather than omitting them.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
