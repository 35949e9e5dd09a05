//! Shared helpers for markup generation.

/// Tags written without a closing tag.
const SELF_CLOSING_TAGS: &[&str] = &["img"];

/// Whether `tag` is written without a closing tag.
#[must_use]
pub(crate) fn is_self_closing(tag: &str) -> bool {
    SELF_CLOSING_TAGS.contains(&tag)
}

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

/// Last path segment of a URL, used as a fallback link title.
///
/// Trailing slashes are ignored. An empty input yields `.` and a
/// slash-only input yields `/`.
#[must_use]
pub(crate) fn base_name(url: &str) -> &str {
    if url.is_empty() {
        return ".";
    }
    let trimmed = url.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
