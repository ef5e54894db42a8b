//! Text normalization helpers shared by extraction and prompt building.

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Collapse every whitespace run into a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep at most `max_chars` characters, appending [`ELLIPSIS`] when cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            let mut out = String::with_capacity(byte_idx + ELLIPSIS.len());
            out.push_str(&text[..byte_idx]);
            out.push_str(ELLIPSIS);
            out
        }
        None => text.to_string(),
    }
}
