//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod paths;
pub(crate) mod serve;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use st_config::Config;
use st_content::{ContentSource, PrismicClient};
use st_post::SiteLocale;
use st_render::{CommentsConfig, PageRenderer};
use st_site::{Site, SiteConfig};

use crate::error::CliError;

pub(crate) use build::BuildArgs;
pub(crate) use paths::PathsArgs;
pub(crate) use serve::ServeArgs;

/// Wire the content client, renderer and site settings from `config`.
pub(crate) fn site_from_config(config: &Config) -> Result<Arc<Site>, CliError> {
    let source: Arc<dyn ContentSource> = Arc::new(PrismicClient::new(
        config.require_endpoint()?,
        config.content.access_token.as_deref(),
    )?);

    let locale = SiteLocale::from_str(&config.site.locale)?;
    let mut renderer = PageRenderer::new(config.site.name.clone(), locale);
    if let Some(comments) = &config.comments {
        renderer = renderer.with_comments(CommentsConfig::new(
            comments.repo.clone(),
            comments.theme.clone(),
        ));
    }
    if let Some(href) = &config.site.stylesheet {
        renderer = renderer.with_stylesheet(href.clone());
    }

    let site_config = SiteConfig {
        document_type: config.content.document_type.clone(),
        revalidate: Duration::from_secs(config.site.revalidate_secs),
        ..SiteConfig::default()
    };
    Ok(Arc::new(Site::new(source, renderer, site_config)))
}
