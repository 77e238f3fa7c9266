//! HTTP request handlers.

pub(crate) mod posts;
pub(crate) mod preview;
