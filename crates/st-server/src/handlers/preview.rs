//! Preview mode endpoints.
//!
//! Preview mode is a cookie holding the content service's preview token.
//! While it is set, post pages are rendered from the draft revision it names
//! and bypass the page cache.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Redirect;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::Deserialize;
use st_content::Revision;
use tracing::info;

use crate::error::ServerError;
use crate::state::AppState;

/// Name of the cookie holding the preview token.
pub(crate) const PREVIEW_COOKIE: &str = "spacetraveling_preview";

/// Query of `GET /api/preview`.
#[derive(Debug, Deserialize)]
pub(crate) struct PreviewParams {
    token: Option<String>,
    #[serde(rename = "documentId")]
    document_id: Option<String>,
}

/// Handle GET /api/preview.
///
/// Stores the token in the preview cookie and redirects to the previewed
/// post, or to `/` when the document cannot be routed.
pub(crate) async fn enter_preview(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PreviewParams>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), ServerError> {
    let token = params
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ServerError::BadRequest("missing token query parameter".to_owned()))?;

    let location = {
        let token = token.clone();
        tokio::task::spawn_blocking(move || {
            state
                .site
                .resolve_preview(&token, params.document_id.as_deref())
        })
        .await??
    };
    info!(location = %location, "Entering preview mode");

    let cookie = Cookie::build((PREVIEW_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(cookie), Redirect::temporary(&location)))
}

/// Handle GET /api/exit-preview.
pub(crate) async fn exit_preview(jar: CookieJar) -> (CookieJar, Redirect) {
    let cookie = Cookie::build((PREVIEW_COOKIE, ""))
        .path("/")
        .removal()
        .build();
    (jar.remove(cookie), Redirect::temporary("/"))
}

/// Revision requested by the preview cookie, if any.
pub(crate) fn revision_from_jar(jar: &CookieJar) -> Revision {
    let cookie = jar.get(PREVIEW_COOKIE);
    Revision::from_preview_token(cookie.map(Cookie::value))
}
