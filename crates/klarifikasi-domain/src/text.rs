//! Character-safe text helpers shared by the pipeline stages
//!
//! All limits count Unicode scalar values, never bytes, so truncation can't
//! split a multi-byte character.

/// Marker appended to truncated text
pub const ELLIPSIS: &str = "...";

/// First `max_chars` characters of `text`
pub fn take_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Truncate so the result, ellipsis included, is at most `max_chars` long.
///
/// Text that already fits is returned unchanged.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut out = take_chars(text, keep).trim_end().to_string();
    out.push_str(ELLIPSIS);
    out
}

/// Preview: first `max_chars` characters followed by the ellipsis marker
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut out = take_chars(text, max_chars);
    out.push_str(ELLIPSIS);
    out
}

/// Collapse every whitespace run to a single space and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Mask a secret for logging: first 6 and last 4 characters
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 10 {
        return "*".repeat(count);
    }
    let head: String = secret.chars().take(6).collect();
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}...{}", head, tail)
}
