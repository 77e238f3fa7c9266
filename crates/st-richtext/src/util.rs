//! HTML escaping helpers.

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape text content and turn newlines into line breaks.
pub(crate) fn escape_text(s: &str) -> String {
    escape_html(s).replace('\n', "<br />")
}

/// Convert a UTF-16 offset into a byte offset within `text`.
///
/// Offsets past the end clamp to `text.len()`. Offsets that fall inside a
/// surrogate pair round up to the next character boundary.
pub(crate) fn utf16_to_byte(text: &str, offset: usize) -> usize {
    let mut units = 0;
    for (byte_idx, c) in text.char_indices() {
        if units >= offset {
            return byte_idx;
        }
        units += c.len_utf16();
    }
    text.len()
}
