//! Post page generation.
//!
//! [`Site`] binds a content source to a renderer and answers the three
//! questions the hosting layer asks: which posts exist, what a post route
//! renders to, and where a preview link points.

use std::sync::Arc;
use std::time::Duration;

use st_content::{ContentSource, Revision};
use st_post::{FallbackPolicy, PageState, StaticPaths, enumerate_paths, load_post, post_route};
use st_render::PageRenderer;
use tracing::{debug, info, warn};

use crate::error::SiteError;

/// Default revalidation interval.
pub const DEFAULT_REVALIDATE: Duration = Duration::from_mins(30);

/// Site-wide generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Custom type of post documents.
    pub document_type: String,
    pub fallback: FallbackPolicy,
    /// How long a generated page is served before regeneration.
    pub revalidate: Duration,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            document_type: "post".to_owned(),
            fallback: FallbackPolicy::OnDemand,
            revalidate: DEFAULT_REVALIDATE,
        }
    }
}

/// Outcome of generating a post route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Found,
    NotFound,
}

/// A generated post route.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub slug: String,
    pub html: String,
    pub status: PageStatus,
    /// Rendered from a draft revision.
    pub preview: bool,
}

impl RenderedPage {
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.status == PageStatus::Found
    }
}

/// Post pages of one content repository.
pub struct Site {
    source: Arc<dyn ContentSource>,
    renderer: PageRenderer,
    config: SiteConfig,
}

impl Site {
    #[must_use]
    pub fn new(
        source: Arc<dyn ContentSource>,
        renderer: PageRenderer,
        config: SiteConfig,
    ) -> Self {
        Self {
            source,
            renderer,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[must_use]
    pub fn renderer(&self) -> &PageRenderer {
        &self.renderer
    }

    /// Enumerate every post route.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Content`] if the content source fails.
    pub fn static_paths(&self) -> Result<StaticPaths, SiteError> {
        Ok(enumerate_paths(
            self.source.as_ref(),
            &self.config.document_type,
            self.config.fallback,
        )?)
    }

    /// Load the state of a post route.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Content`] if the content source fails.
    pub fn load(&self, slug: &str, revision: &Revision) -> Result<PageState, SiteError> {
        let page = load_post(
            self.source.as_ref(),
            &self.config.document_type,
            slug,
            revision,
        )?;
        Ok(PageState::from_load(slug, page))
    }

    /// Generate the HTML of a post route.
    ///
    /// A missing post yields a rendered not-found page, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Content`] if the content source fails.
    pub fn render(&self, slug: &str, revision: &Revision) -> Result<RenderedPage, SiteError> {
        let state = self.load(slug, revision)?;
        let status = if state.is_loaded() {
            PageStatus::Found
        } else {
            PageStatus::NotFound
        };
        debug!(slug, ?status, draft = revision.is_draft(), "Rendered post route");
        Ok(RenderedPage {
            slug: slug.to_owned(),
            html: self.renderer.render(&state),
            status,
            preview: state.is_preview(),
        })
    }

    /// Placeholder page for a route still being generated.
    #[must_use]
    pub fn render_loading(&self) -> String {
        self.renderer.render(&PageState::Loading)
    }

    /// Where a preview session for `document_id` should land.
    ///
    /// The document is looked up at the draft revision named by `token`.
    /// Unknown documents, and documents without a slug, land on `/`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Content`] if the content source fails.
    pub fn resolve_preview(
        &self,
        token: &str,
        document_id: Option<&str>,
    ) -> Result<String, SiteError> {
        let Some(id) = document_id.filter(|id| !id.is_empty()) else {
            return Ok("/".to_owned());
        };

        let revision = Revision::Draft(token.to_owned());
        match self.source.get_by_id(id, &revision)? {
            Some(doc) if doc.doc_type == self.config.document_type && !doc.slug().is_empty() => {
                info!(id, slug = doc.slug(), "Resolved preview document");
                Ok(post_route(doc.slug()))
            }
            Some(doc) => {
                warn!(id, doc_type = %doc.doc_type, "Preview document is not a routable post");
                Ok("/".to_owned())
            }
            None => {
                warn!(id, "Preview document not found");
                Ok("/".to_owned())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use st_content::{ContentError, Document, MockCall, MockContentSource, PostData};
    use st_post::SiteLocale;

    use super::*;

    fn post(id: &str, uid: &str, date: &str, title: &str) -> Document {
        Document::new(id, "post")
            .with_uid(uid)
            .with_dates(date, date)
            .with_data(PostData {
                title: title.to_owned(),
                ..Default::default()
            })
    }

    fn source() -> Arc<MockContentSource> {
        Arc::new(
            MockContentSource::new()
                .with_document(post("A", "first", "2021-01-01T00:00:00+0000", "First"))
                .with_document(post("B", "second", "2021-02-01T00:00:00+0000", "Second"))
                .with_draft(
                    "preview-ref",
                    post("B", "second", "2021-02-01T00:00:00+0000", "Second draft"),
                )
                .with_draft("preview-ref", Document::new("P", "page").with_uid("about")),
        )
    }

    fn site(source: Arc<MockContentSource>) -> Site {
        Site::new(
            source,
            PageRenderer::new("spacetraveling", SiteLocale::EnUs),
            SiteConfig::default(),
        )
    }

    #[test]
    fn test_render_found_post() {
        let page = site(source())
            .render("second", &Revision::Published)
            .unwrap();
        assert!(page.is_found());
        assert!(!page.preview);
        assert!(page.html.contains("<title>Second | spacetraveling</title>"));
        assert!(page.html.contains("href=\"/post/first\""));
    }

    #[test]
    fn test_render_missing_post_is_not_found_page() {
        let page = site(source()).render("nope", &Revision::Published).unwrap();
        assert_eq!(page.status, PageStatus::NotFound);
        assert!(page.html.contains("Post not found"));
    }

    #[test]
    fn test_render_preview_requests_draft_revision() {
        let source = source();
        let site = site(Arc::clone(&source));
        let draft = Revision::Draft("preview-ref".to_owned());

        let page = site.render("second", &draft).unwrap();
        assert!(page.preview);
        assert!(page.html.contains("Second draft"));
        assert!(page.html.contains("/api/exit-preview"));
        assert_eq!(
            source.calls()[0],
            MockCall::GetByUid {
                uid: "second".to_owned(),
                revision: draft,
            }
        );
    }

    #[test]
    fn test_render_published_never_requests_draft() {
        let source = source();
        site(Arc::clone(&source))
            .render("second", &Revision::Published)
            .unwrap();
        assert_eq!(
            source.calls()[0],
            MockCall::GetByUid {
                uid: "second".to_owned(),
                revision: Revision::Published,
            }
        );
        let page = site(source).render("second", &Revision::Published).unwrap();
        assert!(!page.html.contains("Second draft"));
    }

    #[test]
    fn test_static_paths() {
        let paths = site(source()).static_paths().unwrap();
        assert_eq!(
            paths.routes().collect::<Vec<_>>(),
            vec!["/post/first", "/post/second"]
        );
    }

    #[test]
    fn test_resolve_preview() {
        let site = site(source());
        assert_eq!(
            site.resolve_preview("preview-ref", Some("B")).unwrap(),
            "/post/second"
        );
        assert_eq!(site.resolve_preview("preview-ref", Some("P")).unwrap(), "/");
        assert_eq!(site.resolve_preview("preview-ref", Some("Z")).unwrap(), "/");
        assert_eq!(site.resolve_preview("preview-ref", None).unwrap(), "/");
    }

    #[test]
    fn test_content_failure_is_error() {
        let source = source();
        source.fail_with("down");
        let result = site(source).render("second", &Revision::Published);
        assert!(matches!(
            result,
            Err(SiteError::Content(ContentError::Unavailable(_)))
        ));
    }

    #[test]
    fn test_loading_page() {
        let html = site(source()).render_loading();
        assert!(html.contains("Loading..."));
    }
}
