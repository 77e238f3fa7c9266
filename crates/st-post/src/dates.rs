//! Timestamp parsing and human-readable formatting.
//!
//! Content timestamps arrive as ISO-8601 strings such as
//! `2021-03-15T10:30:00+0000`. They are parsed into a
//! [`DateTime<FixedOffset>`] so formatting keeps the offset the content
//! service reported.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// Offset-aware formats tried after RFC 3339.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Formats without an offset, interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Error raised for timestamps that are not valid ISO-8601.
#[derive(Debug, thiserror::Error)]
pub enum DateError {
    #[error("Invalid timestamp: {0:?}")]
    Invalid(String),
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),
}

/// Locale used for month names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SiteLocale {
    #[default]
    EnUs,
    PtBr,
}

impl SiteLocale {
    /// Locale identifier as written in configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en_US",
            Self::PtBr => "pt_BR",
        }
    }

    /// Language tag for the `lang` attribute of rendered pages.
    #[must_use]
    pub fn language_tag(self) -> &'static str {
        match self {
            Self::EnUs => "en",
            Self::PtBr => "pt-BR",
        }
    }

    fn as_chrono(self) -> chrono::Locale {
        match self {
            Self::EnUs => chrono::Locale::en_US,
            Self::PtBr => chrono::Locale::pt_BR,
        }
    }
}

impl FromStr for SiteLocale {
    type Err = DateError;

    /// Accepts `en_US`/`en-US`/`en` and `pt_BR`/`pt-BR`/`pt`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "en" | "en_us" => Ok(Self::EnUs),
            "pt" | "pt_br" => Ok(Self::PtBr),
            _ => Err(DateError::UnsupportedLocale(s.to_owned())),
        }
    }
}

impl fmt::Display for SiteLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 (`2021-03-15T10:30:00Z`, `+00:00`), the compact offset
/// form the content API emits (`+0000`), timestamps without an offset
/// (taken as UTC), and bare dates (midnight UTC).
///
/// # Errors
///
/// Returns [`DateError::Invalid`] if no supported format matches.
pub fn parse_timestamp(input: &str) -> Result<DateTime<FixedOffset>, DateError> {
    let input = input.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed);
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(input, format) {
            return Ok(parsed);
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(parsed.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().fixed_offset())
        .ok_or_else(|| DateError::Invalid(input.to_owned()))
}

/// Two-digit day, abbreviated month, four-digit year: `15 Mar 2021`.
#[must_use]
pub fn format_human_date(timestamp: &DateTime<FixedOffset>, locale: SiteLocale) -> String {
    timestamp
        .format_localized("%d %b %Y", locale.as_chrono())
        .to_string()
}

/// 24-hour `HH:MM` in the timestamp's own offset.
#[must_use]
pub fn format_time_of_day(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format("%H:%M").to_string()
}
