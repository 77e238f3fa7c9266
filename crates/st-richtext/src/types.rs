//! Rich text document model.
//!
//! Mirrors the structured text format returned by the content API: a flat
//! list of blocks, each carrying plain text plus inline spans that point into
//! that text.

/// A single rich text block (paragraph, heading, list item, image, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Block {
    /// Block type.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: BlockKind,
    /// Plain text content (empty for images and embeds).
    #[cfg_attr(feature = "serde", serde(default))]
    pub text: String,
    /// Inline formatting spans over `text`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub spans: Vec<Span>,
    /// Image URL (image blocks only).
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub url: Option<String>,
    /// Image alternative text (image blocks only).
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub alt: Option<String>,
    /// oEmbed payload (embed blocks only).
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub oembed: Option<Embed>,
}

impl Block {
    /// Create a text block of the given kind without spans.
    #[must_use]
    pub fn text(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            spans: Vec::new(),
            url: None,
            alt: None,
            oembed: None,
        }
    }

    /// Create a paragraph block.
    #[must_use]
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::text(BlockKind::Paragraph, text)
    }

    /// Create an image block.
    #[must_use]
    pub fn image(url: impl Into<String>, alt: Option<String>) -> Self {
        Self {
            url: Some(url.into()),
            alt,
            ..Self::text(BlockKind::Image, String::new())
        }
    }

    /// Attach a span to this block.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }
}

/// Block type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum BlockKind {
    #[cfg_attr(feature = "serde", serde(rename = "paragraph"))]
    Paragraph,
    #[cfg_attr(feature = "serde", serde(rename = "heading1"))]
    Heading1,
    #[cfg_attr(feature = "serde", serde(rename = "heading2"))]
    Heading2,
    #[cfg_attr(feature = "serde", serde(rename = "heading3"))]
    Heading3,
    #[cfg_attr(feature = "serde", serde(rename = "heading4"))]
    Heading4,
    #[cfg_attr(feature = "serde", serde(rename = "heading5"))]
    Heading5,
    #[cfg_attr(feature = "serde", serde(rename = "heading6"))]
    Heading6,
    #[cfg_attr(feature = "serde", serde(rename = "preformatted"))]
    Preformatted,
    #[cfg_attr(feature = "serde", serde(rename = "list-item"))]
    ListItem,
    #[cfg_attr(feature = "serde", serde(rename = "o-list-item"))]
    OrderedListItem,
    #[cfg_attr(feature = "serde", serde(rename = "image"))]
    Image,
    #[cfg_attr(feature = "serde", serde(rename = "embed"))]
    Embed,
    /// Block types this crate does not know how to render.
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

impl BlockKind {
    /// Heading level (1-6) for heading blocks.
    #[must_use]
    pub fn heading_level(self) -> Option<u8> {
        match self {
            Self::Heading1 => Some(1),
            Self::Heading2 => Some(2),
            Self::Heading3 => Some(3),
            Self::Heading4 => Some(4),
            Self::Heading5 => Some(5),
            Self::Heading6 => Some(6),
            _ => None,
        }
    }
}

/// Inline formatting span.
///
/// `start` and `end` are offsets into the block text counted in UTF-16 code
/// units, which is how the content API reports them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: SpanKind,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub data: Option<SpanData>,
}

impl Span {
    /// Create a span without data.
    #[must_use]
    pub fn new(kind: SpanKind, start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            kind,
            data: None,
        }
    }

    /// Create a hyperlink span to a web URL.
    #[must_use]
    pub fn web_link(start: usize, end: usize, url: impl Into<String>) -> Self {
        Self {
            start,
            end,
            kind: SpanKind::Hyperlink,
            data: Some(SpanData {
                url: Some(url.into()),
                ..SpanData::default()
            }),
        }
    }
}

/// Span type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum SpanKind {
    #[cfg_attr(feature = "serde", serde(rename = "strong"))]
    Strong,
    #[cfg_attr(feature = "serde", serde(rename = "em"))]
    Em,
    #[cfg_attr(feature = "serde", serde(rename = "hyperlink"))]
    Hyperlink,
    #[cfg_attr(feature = "serde", serde(rename = "label"))]
    Label,
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

/// Span payload for hyperlinks and labels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpanData {
    /// Link kind reported by the API ("Web", "Document", "Media").
    #[cfg_attr(
        feature = "serde",
        serde(rename = "link_type", skip_serializing_if = "Option::is_none")
    )]
    pub link_type: Option<String>,
    /// Target URL for web and media links.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub url: Option<String>,
    /// Link target (e.g. `_blank`).
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub target: Option<String>,
    /// Identifier of the linked document for document links.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub uid: Option<String>,
    /// Label name for label spans.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub label: Option<String>,
}

/// oEmbed payload of an embed block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Embed {
    /// Embed type ("video", "rich", ...).
    #[cfg_attr(
        feature = "serde",
        serde(rename = "type", skip_serializing_if = "Option::is_none")
    )]
    pub kind: Option<String>,
    /// Original URL of the embedded resource.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub embed_url: Option<String>,
    /// Provider name (e.g. `YouTube`).
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub provider_name: Option<String>,
    /// Provider-supplied HTML snippet.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub html: Option<String>,
}
