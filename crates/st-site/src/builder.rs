//! Static site export.
//!
//! Output layout:
//!
//! ```text
//! {output_dir}/
//! +-- paths.json              # exported routes, fallback policy, revalidate seconds
//! +-- post/
//!     +-- _fallback.html      # loading page for routes not exported
//!     +-- {slug}/index.html   # one per enumerated post
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use st_content::Revision;
use st_post::post_route;
use tracing::{info, warn};

use crate::error::BuildError;
use crate::site::Site;

/// File name of the route manifest.
pub const PATHS_MANIFEST: &str = "paths.json";

/// File served for routes that were not exported.
pub const FALLBACK_PAGE: &str = "post/_fallback.html";

/// Route manifest written next to the pages.
#[derive(Debug, Serialize)]
struct PathsManifest<'a> {
    paths: &'a [String],
    fallback: bool,
    revalidate: u64,
}

/// Summary of a finished build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Slugs written to disk.
    pub pages: Vec<String>,
    /// Slugs that were enumerated but could not be exported.
    pub skipped: Vec<String>,
}

/// Exports every enumerated post of a [`Site`] as static HTML.
pub struct StaticSiteBuilder {
    site: Arc<Site>,
    output_dir: PathBuf,
}

impl StaticSiteBuilder {
    #[must_use]
    pub fn new(site: Arc<Site>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            site,
            output_dir: output_dir.into(),
        }
    }

    /// Render and write all pages, in parallel.
    ///
    /// Pages are always rendered from published content.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if enumeration or any page render fails, or if
    /// an output file cannot be written.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let paths = self.site.static_paths()?;
        info!(
            count = paths.len(),
            output = %self.output_dir.display(),
            "Building static site"
        );

        fs::create_dir_all(&self.output_dir).map_err(BuildError::io(&self.output_dir))?;

        let slugs: Vec<&String> = paths.slugs.iter().collect();
        let results: Vec<Result<Option<String>, BuildError>> = slugs
            .par_iter()
            .map(|slug| self.export_page(slug))
            .collect();

        let mut report = BuildReport::default();
        for (slug, result) in slugs.into_iter().zip(results) {
            match result? {
                Some(_) => report.pages.push(slug.clone()),
                None => report.skipped.push(slug.clone()),
            }
        }

        self.write_file(FALLBACK_PAGE, &self.site.render_loading())?;

        let routes: Vec<String> = report.pages.iter().map(|slug| post_route(slug)).collect();
        let manifest = PathsManifest {
            paths: &routes,
            fallback: paths.fallback.allows_unknown(),
            revalidate: self.site.config().revalidate.as_secs(),
        };
        self.write_file(PATHS_MANIFEST, &serde_json::to_string_pretty(&manifest)?)?;

        info!(
            pages = report.pages.len(),
            skipped = report.skipped.len(),
            "Static site built"
        );
        Ok(report)
    }

    /// Write one post. Returns `None` when the post cannot be exported.
    fn export_page(&self, slug: &str) -> Result<Option<String>, BuildError> {
        if !is_safe_slug(slug) {
            warn!(slug, "Skipping slug that is not a safe file name");
            return Ok(None);
        }

        let page = self.site.render(slug, &Revision::Published)?;
        if !page.is_found() {
            // Deleted between enumeration and rendering
            warn!(slug, "Enumerated post disappeared, skipping");
            return Ok(None);
        }

        let relative = format!("post/{slug}/index.html");
        self.write_file(&relative, &page.html)?;
        Ok(Some(relative))
    }

    fn write_file(&self, relative: &str, contents: &str) -> Result<(), BuildError> {
        let path = self.output_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(BuildError::io(parent))?;
        }
        fs::write(&path, contents).map_err(BuildError::io(&path))
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// Slug usable as a single path segment.
fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.starts_with('.') && !slug.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use st_content::{ContentError, Document, MockContentSource, PostData};
    use st_post::SiteLocale;
    use st_render::PageRenderer;
    use tempfile::TempDir;

    use super::*;
    use crate::error::SiteError;
    use crate::site::SiteConfig;

    fn post(id: &str, uid: &str, date: &str) -> Document {
        Document::new(id, "post")
            .with_uid(uid)
            .with_dates(date, date)
            .with_data(PostData {
                title: format!("Title of {uid}"),
                ..Default::default()
            })
    }

    fn builder(source: Arc<MockContentSource>, dir: &Path) -> StaticSiteBuilder {
        let site = Site::new(
            source,
            PageRenderer::new("spacetraveling", SiteLocale::EnUs),
            SiteConfig::default(),
        );
        StaticSiteBuilder::new(Arc::new(site), dir)
    }

    #[test]
    fn test_build_writes_pages_fallback_and_manifest() {
        let dir = TempDir::new().unwrap();
        let source = Arc::new(
            MockContentSource::new()
                .with_document(post("A", "first", "2021-01-01T00:00:00+0000"))
                .with_document(post("B", "second", "2021-02-01T00:00:00+0000")),
        );

        let report = builder(source, dir.path()).build().unwrap();
        assert_eq!(report.pages, vec!["first", "second"]);
        assert!(report.skipped.is_empty());

        let first = fs::read_to_string(dir.path().join("post/first/index.html")).unwrap();
        assert!(first.contains("<title>Title of first | spacetraveling</title>"));
        assert!(first.contains("href=\"/post/second\""));

        let fallback = fs::read_to_string(dir.path().join(FALLBACK_PAGE)).unwrap();
        assert!(fallback.contains("Loading..."));

        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(PATHS_MANIFEST)).unwrap())
                .unwrap();
        assert_eq!(
            manifest,
            serde_json::json!({
                "paths": ["/post/first", "/post/second"],
                "fallback": true,
                "revalidate": 1800
            })
        );
    }

    #[test]
    fn test_build_skips_unsafe_slugs() {
        let dir = TempDir::new().unwrap();
        let source = Arc::new(
            MockContentSource::new()
                .with_document(post("A", "first", "2021-01-01T00:00:00+0000"))
                .with_document(post("B", "../escape", "2021-02-01T00:00:00+0000")),
        );

        let report = builder(source, dir.path()).build().unwrap();
        assert_eq!(report.pages, vec!["first"]);
        assert_eq!(report.skipped, vec!["../escape"]);
        assert!(!dir.path().join("escape").exists());

        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(PATHS_MANIFEST)).unwrap())
                .unwrap();
        assert_eq!(manifest["paths"], serde_json::json!(["/post/first"]));
    }

    #[test]
    fn test_build_with_no_posts() {
        let dir = TempDir::new().unwrap();
        let report = builder(Arc::new(MockContentSource::new()), dir.path())
            .build()
            .unwrap();
        assert!(report.pages.is_empty());
        assert!(dir.path().join(FALLBACK_PAGE).exists());
    }

    #[test]
    fn test_build_fails_when_source_fails() {
        let dir = TempDir::new().unwrap();
        let source = Arc::new(MockContentSource::new());
        source.fail_with("down");

        let result = builder(source, dir.path()).build();
        assert!(matches!(
            result,
            Err(BuildError::Site(SiteError::Content(ContentError::Unavailable(_))))
        ));
    }

    #[test]
    fn test_is_safe_slug() {
        assert!(is_safe_slug("hello-world"));
        assert!(!is_safe_slug(""));
        assert!(!is_safe_slug(".."));
        assert!(!is_safe_slug("a/b"));
        assert!(!is_safe_slug("a\\b"));
    }
}
