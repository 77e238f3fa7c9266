//! Inline span rendering.
//!
//! Spans may overlap arbitrarily in the source data. Output stays well-formed
//! by closing and reopening spans that outlive a span ending inside them.

use std::collections::BTreeSet;

use crate::types::{Span, SpanKind};
use crate::util::{escape_html, escape_text, utf16_to_byte};

/// A span resolved to byte offsets with its rendered tags.
struct ResolvedSpan {
    start: usize,
    end: usize,
    open: String,
    close: &'static str,
}

/// Render block text with its inline spans applied.
pub(crate) fn render_inline(
    text: &str,
    spans: &[Span],
    resolve_link: &dyn Fn(&Span) -> Option<String>,
) -> String {
    let mut resolved: Vec<ResolvedSpan> = spans
        .iter()
        .filter_map(|span| resolve_span(text, span, resolve_link))
        .collect();

    if resolved.is_empty() {
        return escape_text(text);
    }

    // Longest span first at a shared start so it becomes the outer element
    resolved.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut points = BTreeSet::from([0, text.len()]);
    for span in &resolved {
        points.insert(span.start);
        points.insert(span.end);
    }
    let points: Vec<usize> = points.into_iter().collect();

    let mut out = String::with_capacity(text.len() * 2);
    let mut stack: Vec<&ResolvedSpan> = Vec::new();

    for (i, &pos) in points.iter().enumerate() {
        if let Some(first_ended) = stack.iter().position(|s| s.end <= pos) {
            let unwound: Vec<&ResolvedSpan> = stack.drain(first_ended..).collect();
            for span in unwound.iter().rev() {
                out.push_str(span.close);
            }
            for span in unwound {
                if span.end > pos {
                    out.push_str(&span.open);
                    stack.push(span);
                }
            }
        }

        for span in resolved.iter().filter(|s| s.start == pos) {
            out.push_str(&span.open);
            stack.push(span);
        }

        if let Some(&next) = points.get(i + 1) {
            out.push_str(&escape_text(&text[pos..next]));
        }
    }

    out
}

fn resolve_span(
    text: &str,
    span: &Span,
    resolve_link: &dyn Fn(&Span) -> Option<String>,
) -> Option<ResolvedSpan> {
    let start = utf16_to_byte(text, span.start);
    let end = utf16_to_byte(text, span.end);
    if start >= end {
        return None;
    }

    let (open, close) = match span.kind {
        SpanKind::Strong => ("<strong>".to_owned(), "</strong>"),
        SpanKind::Em => ("<em>".to_owned(), "</em>"),
        SpanKind::Hyperlink => (link_open_tag(span, resolve_link), "</a>"),
        SpanKind::Label => {
            let label = span
                .data
                .as_ref()
                .and_then(|d| d.label.as_deref())
                .unwrap_or_default();
            (format!("<span class=\"{}\">", escape_html(label)), "</span>")
        }
        SpanKind::Unknown => return None,
    };

    Some(ResolvedSpan {
        start,
        end,
        open,
        close,
    })
}

fn link_open_tag(span: &Span, resolve_link: &dyn Fn(&Span) -> Option<String>) -> String {
    let Some(href) = resolve_link(span) else {
        return "<a>".to_owned();
    };
    let target = span.data.as_ref().and_then(|d| d.target.as_deref());
    match target {
        Some(target) => format!(
            "<a href=\"{}\" target=\"{}\" rel=\"noopener noreferrer\">",
            escape_html(&href),
            escape_html(target)
        ),
        None => format!("<a href=\"{}\">", escape_html(&href)),
    }
}
