//! Structured rich text for spacetraveling.
//!
//! The content API stores long-form text as a flat list of [`Block`]s whose
//! inline formatting lives in [`Span`]s pointing into the block text. This
//! crate owns that model and turns it into HTML. Page code never parses rich
//! text itself.
//!
//! # Example
//!
//! ```
//! use st_richtext::{Block, Span, SpanKind, as_html};
//!
//! let blocks = vec![Block::paragraph("Hello world").with_span(Span::new(SpanKind::Strong, 0, 5))];
//! assert_eq!(as_html(&blocks), "<p><strong>Hello</strong> world</p>");
//! ```
//!
//! # Features
//!
//! - `serde`: derive `Deserialize`/`Serialize` using the content API field names

mod html;
mod inline;
mod types;
mod util;

pub use html::{HtmlSerializer, as_html};
pub use types::{Block, BlockKind, Embed, Span, SpanData, SpanKind};
pub use util::escape_html;
