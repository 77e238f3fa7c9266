//! HTTP server for spacetraveling post pages.
//!
//! This crate provides an axum server serving:
//! - `GET /post/{slug}`: a post page, from the revalidating page cache
//! - `GET /api/preview`: enter preview mode and redirect to the draft
//! - `GET /api/exit-preview`: leave preview mode
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use st_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_owned(),
//!         port: 3000,
//!         prerender: true,
//!         cache_enabled: true,
//!         version: "0.1.0".to_owned(),
//!     };
//!     run_server(config, Arc::new(site)).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (st-server)
//!                        │
//!                        ├─► PageCache (fresh / stale / miss)
//!                        │
//!                        └─► spawn_blocking ──► Site::render ──► ContentSource
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod prerender;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use st_cache::{MemoryPageCache, NullPageCache, PageCache};
use st_site::Site;
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Generate every enumerated post before accepting requests.
    pub prerender: bool,
    /// Keep generated pages. When off, every request regenerates.
    pub cache_enabled: bool,
    /// Application version (part of every `ETag`).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
            prerender: true,
            cache_enabled: true,
            version: String::new(),
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if enumeration or pre-rendering fails, or if the server
/// fails to bind.
pub async fn run_server(config: ServerConfig, site: Arc<Site>) -> Result<(), ServerError> {
    let cache = page_cache(config.cache_enabled, site.config().revalidate);
    let prerender = config.prerender && config.cache_enabled;

    let needs_paths = prerender || !site.config().fallback.allows_unknown();
    let known_paths = if needs_paths {
        let site = Arc::clone(&site);
        let task = tokio::task::spawn_blocking(move || site.static_paths());
        Some(task.await??)
    } else {
        None
    };

    let state = Arc::new(AppState {
        site,
        cache,
        known_paths,
        version: config.version.clone(),
    });

    if prerender
        && let Some(paths) = state.known_paths.clone()
    {
        let prerender_state = Arc::clone(&state);
        let count = tokio::task::spawn_blocking(move || {
            prerender::prerender(&prerender_state, &paths)
        })
        .await??;
        tracing::info!(count, "Pre-rendered posts");
    }

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Page store for the server: revalidating memory cache, or none at all.
fn page_cache(enabled: bool, revalidate: Duration) -> Arc<dyn PageCache> {
    if enabled {
        Arc::new(MemoryPageCache::new(revalidate))
    } else {
        tracing::info!("Page cache disabled");
        Arc::new(NullPageCache)
    }
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from the loaded configuration.
#[must_use]
pub fn server_config_from_config(config: &st_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        prerender: config.site.prerender,
        cache_enabled: config.site.cache,
        version,
    }
}

#[cfg(test)]
mod tests {
    use st_cache::{CacheLookup, CachedPage};

    use super::*;

    #[test]
    fn test_page_cache_keeps_pages_when_enabled() {
        let cache = page_cache(true, Duration::from_secs(60));
        cache.store("first", CachedPage::new("<p>1</p>", "\"1\""));
        assert!(matches!(cache.lookup("first"), CacheLookup::Fresh(_)));
    }

    #[test]
    fn test_page_cache_disabled_never_hits() {
        let cache = page_cache(false, Duration::from_secs(60));
        cache.store("first", CachedPage::new("<p>1</p>", "\"1\""));
        assert!(matches!(cache.lookup("first"), CacheLookup::Miss));
    }
}
