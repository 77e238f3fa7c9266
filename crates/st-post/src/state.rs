//! Page lifecycle state.

use crate::loader::PostPage;

/// What a post route currently shows.
///
/// `Loading` covers a route whose data is still being generated; the page
/// renders a placeholder and never touches post fields.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    Loading,
    Loaded(Box<PostPage>),
    NotFound { slug: String },
}

impl PageState {
    /// State for the outcome of a load.
    #[must_use]
    pub fn from_load(slug: &str, page: Option<PostPage>) -> Self {
        match page {
            Some(page) => Self::Loaded(Box::new(page)),
            None => Self::NotFound {
                slug: slug.to_owned(),
            },
        }
    }

    /// Whether post data is available.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// Whether this is a draft preview.
    #[must_use]
    pub fn is_preview(&self) -> bool {
        matches!(self, Self::Loaded(page) if page.preview)
    }
}
