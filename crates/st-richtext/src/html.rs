//! HTML serialization of rich text blocks.

use std::fmt::Write;

use crate::inline::render_inline;
use crate::types::{Block, BlockKind, Span};
use crate::util::escape_html;

/// List container currently open while serializing.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn of(kind: BlockKind) -> Option<Self> {
        match kind {
            BlockKind::ListItem => Some(Self::Unordered),
            BlockKind::OrderedListItem => Some(Self::Ordered),
            _ => None,
        }
    }

    fn open_tag(self) -> &'static str {
        match self {
            Self::Unordered => "<ul>",
            Self::Ordered => "<ol>",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            Self::Unordered => "</ul>",
            Self::Ordered => "</ol>",
        }
    }
}

/// Serializes rich text blocks to HTML.
///
/// Document links (links to other entries in the content repository) are
/// resolved as `{document_link_prefix}{uid}`.
#[derive(Clone, Debug)]
pub struct HtmlSerializer {
    document_link_prefix: String,
}

impl Default for HtmlSerializer {
    fn default() -> Self {
        Self {
            document_link_prefix: "/".to_owned(),
        }
    }
}

impl HtmlSerializer {
    /// Create a serializer with the default document link prefix (`/`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the URL prefix used to resolve document links.
    #[must_use]
    pub fn with_document_link_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.document_link_prefix = prefix.into();
        self
    }

    /// Serialize blocks to an HTML fragment.
    ///
    /// Consecutive list items are grouped into a single `<ul>` or `<ol>`.
    /// Unknown block types are skipped.
    #[must_use]
    pub fn serialize(&self, blocks: &[Block]) -> String {
        let mut html = String::new();
        let mut open_list: Option<ListKind> = None;

        for block in blocks {
            let list = ListKind::of(block.kind);
            if list != open_list {
                if let Some(current) = open_list {
                    html.push_str(current.close_tag());
                }
                if let Some(next) = list {
                    html.push_str(next.open_tag());
                }
                open_list = list;
            }
            self.write_block(&mut html, block);
        }

        if let Some(current) = open_list {
            html.push_str(current.close_tag());
        }

        html
    }

    fn write_block(&self, html: &mut String, block: &Block) {
        let resolve = |span: &Span| self.resolve_link(span);
        match block.kind {
            BlockKind::Paragraph => {
                let _ = write!(
                    html,
                    "<p>{}</p>",
                    render_inline(&block.text, &block.spans, &resolve)
                );
            }
            BlockKind::Heading1
            | BlockKind::Heading2
            | BlockKind::Heading3
            | BlockKind::Heading4
            | BlockKind::Heading5
            | BlockKind::Heading6 => {
                let level = block.kind.heading_level().unwrap_or(1);
                let _ = write!(
                    html,
                    "<h{level}>{}</h{level}>",
                    render_inline(&block.text, &block.spans, &resolve)
                );
            }
            BlockKind::Preformatted => {
                let _ = write!(
                    html,
                    "<pre>{}</pre>",
                    render_inline(&block.text, &block.spans, &resolve)
                );
            }
            BlockKind::ListItem | BlockKind::OrderedListItem => {
                let _ = write!(
                    html,
                    "<li>{}</li>",
                    render_inline(&block.text, &block.spans, &resolve)
                );
            }
            BlockKind::Image => {
                if let Some(url) = &block.url {
                    let _ = write!(
                        html,
                        "<p class=\"block-img\"><img src=\"{}\" alt=\"{}\" /></p>",
                        escape_html(url),
                        escape_html(block.alt.as_deref().unwrap_or_default())
                    );
                }
            }
            BlockKind::Embed => {
                if let Some(embed) = &block.oembed {
                    // Provider HTML is trusted content from the repository
                    let _ = write!(
                        html,
                        "<div data-oembed=\"{}\" data-oembed-type=\"{}\" data-oembed-provider=\"{}\">{}</div>",
                        escape_html(embed.embed_url.as_deref().unwrap_or_default()),
                        escape_html(embed.kind.as_deref().unwrap_or_default()),
                        escape_html(embed.provider_name.as_deref().unwrap_or_default()),
                        embed.html.as_deref().unwrap_or_default()
                    );
                }
            }
            BlockKind::Unknown => {}
        }
    }

    fn resolve_link(&self, span: &Span) -> Option<String> {
        let data = span.data.as_ref()?;
        if let Some(url) = &data.url {
            return Some(url.clone());
        }
        data.uid
            .as_ref()
            .map(|uid| format!("{}{uid}", self.document_link_prefix))
    }
}

/// Serialize blocks to HTML with the default serializer.
#[must_use]
pub fn as_html(blocks: &[Block]) -> String {
    HtmlSerializer::default().serialize(blocks)
}
