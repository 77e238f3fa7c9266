//! Values derived from a loaded post for display.

use tracing::warn;

use crate::dates::{SiteLocale, format_human_date, format_time_of_day, parse_timestamp};
use crate::loader::PostPage;
use crate::reading_time::{count_words, estimate_reading_minutes};

/// Display metadata of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostMeta {
    /// Publication date, e.g. `15 Mar 2021`.
    pub published_date: Option<String>,
    /// Last edit date.
    pub updated_date: Option<String>,
    /// Last edit time of day, e.g. `10:30`.
    pub updated_time: Option<String>,
    pub word_count: usize,
    pub reading_minutes: usize,
}

impl PostMeta {
    /// Compute display metadata.
    ///
    /// Missing or malformed timestamps leave the matching fields empty.
    #[must_use]
    pub fn from_page(page: &PostPage, locale: SiteLocale) -> Self {
        let post = &page.post;
        let published = post
            .first_publication_date
            .as_deref()
            .and_then(|raw| parse_logged(raw, "first_publication_date"));
        let updated = post
            .last_publication_date
            .as_deref()
            .and_then(|raw| parse_logged(raw, "last_publication_date"));

        Self {
            published_date: published.map(|ts| format_human_date(&ts, locale)),
            updated_date: updated.map(|ts| format_human_date(&ts, locale)),
            updated_time: updated.map(|ts| format_time_of_day(&ts)),
            word_count: count_words(&post.data.content),
            reading_minutes: estimate_reading_minutes(&post.data.content),
        }
    }
}

fn parse_logged(raw: &str, field: &str) -> Option<chrono::DateTime<chrono::FixedOffset>> {
    parse_timestamp(raw)
        .inspect_err(|e| warn!(field, error = %e, "Ignoring unparseable timestamp"))
        .ok()
}
