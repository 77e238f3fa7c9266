//! Post page generation and static export for spacetraveling.
//!
//! - [`Site`]: enumerate post routes, render a route at a revision, resolve
//!   preview links
//! - [`StaticSiteBuilder`]: write every enumerated post to disk
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use st_content::{PrismicClient, Revision};
//! use st_post::SiteLocale;
//! use st_render::PageRenderer;
//! use st_site::{Site, SiteConfig, StaticSiteBuilder};
//!
//! let source = Arc::new(PrismicClient::new("https://repo.cdn.prismic.io/api/v2", None)?);
//! let renderer = PageRenderer::new("spacetraveling", SiteLocale::EnUs);
//! let site = Arc::new(Site::new(source, renderer, SiteConfig::default()));
//!
//! let page = site.render("hello-world", &Revision::Published)?;
//! StaticSiteBuilder::new(site, "dist").build()?;
//! ```

mod builder;
mod error;
mod site;

pub use builder::{BuildReport, FALLBACK_PAGE, PATHS_MANIFEST, StaticSiteBuilder};
pub use error::{BuildError, SiteError};
pub use site::{DEFAULT_REVALIDATE, PageStatus, RenderedPage, Site, SiteConfig};
