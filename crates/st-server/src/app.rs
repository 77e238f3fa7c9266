//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/post/{slug}", get(handlers::posts::get_post))
        .route("/api/preview", get(handlers::preview::enter_preview))
        .route("/api/exit-preview", get(handlers::preview::exit_preview))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use pretty_assertions::assert_eq;
    use st_cache::{CacheLookup, CachedPage, MemoryPageCache, NullPageCache, PageCache};
    use st_content::{Document, MockCall, MockContentSource, PostData, Revision};
    use st_post::{FallbackPolicy, SiteLocale, StaticPaths};
    use st_render::PageRenderer;
    use st_site::{Site, SiteConfig};
    use tower::ServiceExt;

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

    /// Preview ref with characters that are not valid in a raw cookie value.
    const PREVIEW_URL: &str = "https://repo.prismic.io/previews/abc;x=1";

    fn source() -> Arc<MockContentSource> {
        Arc::new(
            MockContentSource::new()
                .with_document(post("A", "first", "2021-01-01T00:00:00+0000", "First"))
                .with_document(post("B", "second", "2021-02-01T00:00:00+0000", "Second"))
                .with_draft(
                    "preview-ref",
                    post("B", "second", "2021-02-01T00:00:00+0000", "Second draft"),
                )
                .with_draft(
                    PREVIEW_URL,
                    post(
                        "B",
                        "second",
                        "2021-02-01T00:00:00+0000",
                        "Second URL draft",
                    ),
                ),
        )
    }

    struct Harness {
        source: Arc<MockContentSource>,
        cache: Arc<MemoryPageCache>,
        state: Arc<AppState>,
    }

    fn harness_with(config: SiteConfig, known_paths: Option<StaticPaths>) -> Harness {
        let source = source();
        let cache = Arc::new(MemoryPageCache::new(config.revalidate));
        let site = Site::new(
            Arc::clone(&source) as Arc<dyn st_content::ContentSource>,
            PageRenderer::new("spacetraveling", SiteLocale::EnUs),
            config,
        );
        let state = Arc::new(AppState {
            site: Arc::new(site),
            cache: Arc::clone(&cache) as Arc<dyn PageCache>,
            known_paths,
            version: "test".to_owned(),
        });
        Harness {
            source,
            cache,
            state,
        }
    }

    fn harness() -> Harness {
        harness_with(SiteConfig::default(), None)
    }

    async fn send(state: &Arc<AppState>, request: Request<Body>) -> Response {
        create_router(Arc::clone(state))
            .oneshot(request)
            .await
            .unwrap()
    }

    async fn get(state: &Arc<AppState>, uri: &str) -> Response {
        send(state, Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn header_str<'a>(response: &'a Response, name: header::HeaderName) -> &'a str {
        response.headers()[name].to_str().unwrap()
    }

    #[tokio::test]
    async fn test_get_post_renders_and_caches() {
        let h = harness();
        let response = get(&h.state, "/post/second").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            header_str(&response, header::CACHE_CONTROL),
            "s-maxage=1800, stale-while-revalidate"
        );
        assert!(response.headers().contains_key(header::ETAG));
        assert!(response.headers().contains_key(header::LAST_MODIFIED));
        assert_eq!(header_str(&response, header::X_FRAME_OPTIONS), "DENY");

        let body = body_text(response).await;
        assert!(body.contains("<title>Second | spacetraveling</title>"));
        assert!(body.contains("href=\"/post/first\""));
        assert!(matches!(h.cache.lookup("second"), CacheLookup::Fresh(_)));
    }

    #[tokio::test]
    async fn test_fresh_page_is_served_from_cache() {
        let h = harness();
        get(&h.state, "/post/second").await;
        h.source.clear_calls();

        let response = get(&h.state, "/post/second").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(h.source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_if_none_match_returns_not_modified() {
        let h = harness();
        let first = get(&h.state, "/post/second").await;
        let etag = header_str(&first, header::ETAG).to_owned();

        let request = Request::get("/post/second")
            .header(header::IF_NONE_MATCH, &etag)
            .body(Body::empty())
            .unwrap();
        let response = send(&h.state, request).await;
        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
        assert_eq!(header_str(&response, header::ETAG), etag);
    }

    #[tokio::test]
    async fn test_missing_post_is_404_and_not_cached() {
        let h = harness();
        let response = get(&h.state, "/post/missing").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(header_str(&response, header::CACHE_CONTROL), "no-store");
        assert!(body_text(response).await.contains("Post not found"));
        assert!(h.cache.is_empty());
    }

    #[tokio::test]
    async fn test_generation_in_flight_serves_loading_page() {
        let h = harness();
        let _guard = h.cache.try_begin_regeneration("second").unwrap();

        let response = get(&h.state, "/post/second").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header_str(&response, header::CACHE_CONTROL), "no-store");
        let body = body_text(response).await;
        assert!(body.contains("Loading..."));
        assert!(body.contains("http-equiv=\"refresh\""));
        assert!(h.source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_stale_page_is_served_immediately() {
        let h = harness();
        h.cache.store(
            "second",
            CachedPage {
                generated_at: SystemTime::now() - Duration::from_secs(3600),
                ..CachedPage::new("<p>stale copy</p>", "\"stale\"")
            },
        );

        let response = get(&h.state, "/post/second").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header_str(&response, header::ETAG), "\"stale\"");
        assert_eq!(body_text(response).await, "<p>stale copy</p>");
    }

    #[tokio::test]
    async fn test_preview_cookie_renders_draft_without_caching() {
        let h = harness();
        let request = Request::get("/post/second")
            .header(header::COOKIE, "spacetraveling_preview=preview-ref")
            .body(Body::empty())
            .unwrap();
        let response = send(&h.state, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            header_str(&response, header::CACHE_CONTROL),
            "private, no-store"
        );
        let body = body_text(response).await;
        assert!(body.contains("Second draft"));
        assert!(body.contains("/api/exit-preview"));
        assert!(h.cache.is_empty());
        assert_eq!(
            h.source.calls()[0],
            MockCall::GetByUid {
                uid: "second".to_owned(),
                revision: Revision::Draft("preview-ref".to_owned()),
            }
        );
    }

    #[tokio::test]
    async fn test_enter_preview_sets_cookie_and_redirects() {
        let h = harness();
        let response = get(&h.state, "/api/preview?token=preview-ref&documentId=B").await;

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(header_str(&response, header::LOCATION), "/post/second");
        let cookie = header_str(&response, header::SET_COOKIE);
        assert!(cookie.starts_with("spacetraveling_preview=preview-ref;"));
        assert!(cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn test_preview_cookie_round_trips_url_token() {
        let h = harness();
        let response = get(
            &h.state,
            "/api/preview?token=https%3A%2F%2Frepo.prismic.io%2Fpreviews%2Fabc%3Bx%3D1&documentId=B",
        )
        .await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

        let set_cookie = header_str(&response, header::SET_COOKIE);
        let pair = set_cookie.split(';').next().unwrap().to_owned();
        assert!(!pair.contains("%25"));

        let request = Request::get("/post/second")
            .header(header::COOKIE, pair)
            .body(Body::empty())
            .unwrap();
        let response = send(&h.state, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Second URL draft"));
    }

    #[tokio::test]
    async fn test_enter_preview_requires_token() {
        let h = harness();
        let response = get(&h.state, "/api/preview?documentId=B").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_exit_preview_clears_cookie() {
        let h = harness();
        let request = Request::get("/api/exit-preview")
            .header(header::COOKIE, "spacetraveling_preview=preview-ref")
            .body(Body::empty())
            .unwrap();
        let response = send(&h.state, request).await;

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(header_str(&response, header::LOCATION), "/");
        let cookie = header_str(&response, header::SET_COOKIE);
        assert!(cookie.starts_with("spacetraveling_preview="));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_content_failure_is_500() {
        let h = harness();
        h.source.fail_with("down");
        let response = get(&h.state, "/post/second").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(h.cache.is_empty());
    }

    #[tokio::test]
    async fn test_rejecting_fallback_only_serves_known_slugs() {
        let config = SiteConfig {
            fallback: FallbackPolicy::Reject,
            ..SiteConfig::default()
        };
        let paths = StaticPaths {
            slugs: ["first".to_owned()].into(),
            fallback: FallbackPolicy::Reject,
        };
        let h = harness_with(config, Some(paths));

        assert_eq!(get(&h.state, "/post/first").await.status(), StatusCode::OK);
        assert_eq!(
            get(&h.state, "/post/second").await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_on_demand_fallback_serves_unlisted_slug() {
        let paths = StaticPaths {
            slugs: ["first".to_owned()].into(),
            fallback: FallbackPolicy::OnDemand,
        };
        let h = harness_with(SiteConfig::default(), Some(paths));
        assert!(!h.state.known_paths.as_ref().unwrap().contains("second"));

        let response = get(&h.state, "/post/second").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Second | spacetraveling"));
        assert!(matches!(h.cache.lookup("second"), CacheLookup::Fresh(_)));
    }

    #[tokio::test]
    async fn test_disabled_cache_regenerates_every_request() {
        let h = harness();
        let state = Arc::new(AppState {
            site: Arc::clone(&h.state.site),
            cache: Arc::new(NullPageCache),
            known_paths: None,
            version: "test".to_owned(),
        });

        for _ in 0..2 {
            h.source.clear_calls();
            let response = get(&state, "/post/second").await;
            assert_eq!(response.status(), StatusCode::OK);
            assert!(response.headers().contains_key(header::ETAG));
            assert!(!h.source.calls().is_empty());
        }
    }

    #[tokio::test]
    async fn test_prerender_fills_cache() {
        let h = harness();
        let paths = h.state.site.static_paths().unwrap();
        let count = crate::prerender::prerender(&h.state, &paths).unwrap();
        assert_eq!(count, 2);
        assert_eq!(h.cache.len(), 2);
    }
}
