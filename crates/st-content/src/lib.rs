//! Headless CMS content access for spacetraveling.
//!
//! This crate provides the [`ContentSource`] trait that page code queries for
//! documents, decoupling page generation from the content service:
//!
//! - [`PrismicClient`]: sync HTTP client for a Prismic-style REST API
//! - [`MockContentSource`]: in-memory source for tests (behind the `mock` feature)
//!
//! # Example
//!
//! ```ignore
//! use st_content::{ContentSource, PrismicClient, Revision};
//!
//! let client = PrismicClient::new("https://my-repo.cdn.prismic.io/api/v2", None)?;
//! let post = client.get_by_uid("post", "hello-world", &Revision::Published)?;
//! ```

mod client;
mod error;
#[cfg(feature = "mock")]
mod mock;
mod predicate;
mod source;
mod types;

pub use client::PrismicClient;
pub use error::ContentError;
#[cfg(feature = "mock")]
pub use mock::{MockCall, MockContentSource};
pub use source::{
    ContentSource, DEFAULT_PAGE_SIZE, DocumentQuery, MAX_PAGE_SIZE, OrderField, Ordering,
    Revision, SortDirection,
};
pub use types::{Banner, ContentSection, Document, PostData, QueryPage};
