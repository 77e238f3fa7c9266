//! Startup pre-rendering of enumerated posts.

use rayon::prelude::*;
use st_post::StaticPaths;
use tracing::warn;

use crate::error::ServerError;
use crate::handlers::posts::{Generated, generate_published};
use crate::state::AppState;

/// Generate and cache every enumerated post in parallel.
///
/// Returns the number of pages cached.
///
/// # Errors
///
/// Returns the first [`ServerError`] if any page fails to generate.
pub(crate) fn prerender(state: &AppState, paths: &StaticPaths) -> Result<usize, ServerError> {
    let slugs: Vec<&String> = paths.slugs.iter().collect();
    let results: Vec<Result<bool, ServerError>> = slugs
        .par_iter()
        .map(|slug| {
            let generated = generate_published(state, slug)?;
            if matches!(generated, Generated::NotFound(_)) {
                warn!(slug = %slug, "Enumerated post disappeared before pre-rendering");
                return Ok(false);
            }
            Ok(true)
        })
        .collect();

    let mut cached = 0;
    for result in results {
        if result? {
            cached += 1;
        }
    }
    Ok(cached)
}
