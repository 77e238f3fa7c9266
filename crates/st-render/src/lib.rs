//! HTML rendering for spacetraveling.
//!
//! [`PageRenderer`] turns a [`st_post::PageState`] into a complete HTML
//! document. Rendering is pure: no I/O, no clock, no shared state.

mod comments;
mod labels;
mod template;

pub use comments::{CommentsConfig, UTTERANCES_ORIGIN};
pub use labels::Labels;
pub use template::PageRenderer;
