//! Post page endpoint.
//!
//! Published pages go through the page cache: fresh entries are served
//! directly, stale entries are served while one background task regenerates
//! them, and misses are generated in the request. A miss that finds a
//! generation already in flight gets the loading page. Preview requests skip
//! the cache entirely.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use st_cache::{CacheLookup, CachedPage, RegenerationGuard};
use st_content::Revision;
use tracing::{debug, info, warn};

use crate::error::ServerError;
use crate::handlers::preview::revision_from_jar;
use crate::state::AppState;

/// Cache-Control of responses that must never be reused.
const NO_STORE: &str = "no-store";

/// Cache-Control of draft pages.
const PREVIEW_CACHE_CONTROL: &str = "private, no-store";

/// Outcome of generating a published page.
pub(crate) enum Generated {
    Found(CachedPage),
    NotFound(String),
}

/// Handle GET /post/{slug}.
pub(crate) async fn get_post(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let revision = revision_from_jar(&jar);
    if revision.is_draft() {
        return render_preview(state, slug, revision).await;
    }

    if !state.accepts(&slug) {
        debug!(slug, "Slug was not enumerated and fallback is disabled");
        return Ok(not_found(state.site.renderer().render_not_found(&slug)));
    }

    let revalidate = state.revalidate();
    match state.cache.lookup(&slug) {
        CacheLookup::Fresh(page) => Ok(cached_response(&page, &headers, revalidate)),
        CacheLookup::Stale(page) => {
            if let Some(guard) = state.cache.try_begin_regeneration(&slug) {
                spawn_revalidation(Arc::clone(&state), slug, guard);
            }
            Ok(cached_response(&page, &headers, revalidate))
        }
        CacheLookup::Miss => {
            let Some(guard) = state.cache.try_begin_regeneration(&slug) else {
                debug!(slug, "Generation in flight, serving loading page");
                return Ok(loading(state.site.render_loading()));
            };
            match regenerate(Arc::clone(&state), slug, guard).await? {
                Generated::Found(page) => Ok(cached_response(&page, &headers, revalidate)),
                Generated::NotFound(html) => Ok(not_found(html)),
            }
        }
    }
}

/// Render a draft page. Never cached.
async fn render_preview(
    state: Arc<AppState>,
    slug: String,
    revision: Revision,
) -> Result<Response, ServerError> {
    let page = tokio::task::spawn_blocking(move || state.site.render(&slug, &revision)).await??;
    let status = if page.is_found() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    Ok((
        status,
        [(header::CACHE_CONTROL, PREVIEW_CACHE_CONTROL)],
        Html(page.html),
    )
        .into_response())
}

/// Generate a published page on the blocking pool, holding `guard` until done.
async fn regenerate(
    state: Arc<AppState>,
    slug: String,
    guard: RegenerationGuard,
) -> Result<Generated, ServerError> {
    tokio::task::spawn_blocking(move || {
        let _guard = guard;
        generate_published(&state, &slug)
    })
    .await?
}

fn spawn_revalidation(state: Arc<AppState>, slug: String, guard: RegenerationGuard) {
    debug!(slug, "Revalidating stale page");
    tokio::spawn(async move {
        let key = slug.clone();
        // The stale page stays cached on failure
        if let Err(e) = regenerate(state, slug, guard).await {
            warn!(slug = %key, error = %e, "Background revalidation failed");
        }
    });
}

/// Render the published revision of `slug` and update the cache.
///
/// A post that no longer exists is dropped from the cache.
pub(crate) fn generate_published(state: &AppState, slug: &str) -> Result<Generated, ServerError> {
    let page = state.site.render(slug, &Revision::Published)?;
    if !page.is_found() {
        state.cache.invalidate(slug);
        return Ok(Generated::NotFound(page.html));
    }

    let etag = compute_etag(&state.version, &page.html);
    let cached = CachedPage::new(page.html, etag);
    state.cache.store(slug, cached.clone());
    info!(slug, "Generated post page");
    Ok(Generated::Found(cached))
}

fn cached_response(page: &CachedPage, headers: &HeaderMap, revalidate: Duration) -> Response {
    let cache_control = format!("s-maxage={}, stale-while-revalidate", revalidate.as_secs());

    // Check If-None-Match header for conditional request
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == page.etag.as_bytes()
    {
        return (
            StatusCode::NOT_MODIFIED,
            [
                (header::ETAG, page.etag.clone()),
                (header::CACHE_CONTROL, cache_control),
            ],
        )
            .into_response();
    }

    let last_modified: DateTime<Utc> = page.generated_at.into();
    (
        [
            (header::ETAG, page.etag.clone()),
            (
                header::LAST_MODIFIED,
                last_modified
                    .format("%a, %d %b %Y %H:%M:%S GMT")
                    .to_string(),
            ),
            (header::CACHE_CONTROL, cache_control),
        ],
        Html(page.html.to_string()),
    )
        .into_response()
}

fn not_found(html: String) -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CACHE_CONTROL, NO_STORE)],
        Html(html),
    )
        .into_response()
}

fn loading(html: String) -> Response {
    ([(header::CACHE_CONTROL, NO_STORE)], Html(html)).into_response()
}

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}
