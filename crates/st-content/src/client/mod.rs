//! Prismic-style REST API client.
//!
//! Provides a sync HTTP client for a headless content repository. Every
//! search runs against a ref: the master ref for published content, or a
//! preview ref for drafts. The master ref is fetched from the API root and
//! reused for a few seconds.

mod search;

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::Agent;

use crate::error::ContentError;
use crate::source::Revision;
use crate::types::ApiInfo;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// How long a fetched master ref is reused.
const MASTER_REF_TTL: Duration = Duration::from_secs(5);

/// Master ref with its fetch time.
struct CachedRef {
    value: String,
    fetched_at: Instant,
}

/// Content API client.
pub struct PrismicClient {
    agent: Agent,
    endpoint: String,
    access_token: Option<String>,
    master_ref: Mutex<Option<CachedRef>>,
}

impl PrismicClient {
    /// Create a client for the API rooted at `endpoint`
    /// (e.g. `https://my-repo.cdn.prismic.io/api/v2`).
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidEndpoint`] if `endpoint` is not an
    /// http(s) URL.
    pub fn new(endpoint: &str, access_token: Option<&str>) -> Result<Self, ContentError> {
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ContentError::InvalidEndpoint(endpoint.to_owned()));
        }

        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Ok(Self {
            agent,
            endpoint: endpoint.trim_end_matches('/').to_owned(),
            access_token: access_token
                .filter(|t| !t.is_empty())
                .map(ToOwned::to_owned),
            master_ref: Mutex::new(None),
        })
    }

    /// Resolve the ref to query for a revision.
    fn resolve_ref(&self, revision: &Revision) -> Result<String, ContentError> {
        match revision {
            Revision::Draft(preview_ref) => Ok(preview_ref.clone()),
            Revision::Published => self.master_ref(),
        }
    }

    /// Get the current master ref, fetching it if the cached one expired.
    fn master_ref(&self) -> Result<String, ContentError> {
        let mut cached = self
            .master_ref
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(entry) = cached.as_ref()
            && entry.fetched_at.elapsed() < MASTER_REF_TTL
        {
            return Ok(entry.value.clone());
        }

        let info: ApiInfo = self.get_json(&self.endpoint, &[])?;
        let master = info
            .refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .ok_or(ContentError::MissingMasterRef)?;

        debug!(master_ref = %master.reference, "Fetched master ref");
        *cached = Some(CachedRef {
            value: master.reference.clone(),
            fetched_at: Instant::now(),
        });
        Ok(master.reference)
    }

    /// Send a GET request and decode the JSON body.
    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, ContentError> {
        let mut request = self.agent.get(url).header("Accept", "application/json");
        for (key, value) in params {
            request = request.query(key, value);
        }
        if let Some(token) = &self.access_token {
            request = request.query("access_token", token);
        }

        let response = request.call()?;
        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ContentError::HttpResponse {
                status,
                body: error_body,
            });
        }

        Ok(body_reader.read_json()?)
    }
}
