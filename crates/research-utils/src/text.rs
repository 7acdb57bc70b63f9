//! Character-budget helpers
//!
//! Every budget in the workspace is counted in `char`s, never bytes, so cutting
//! never lands inside a multi-byte sequence.

/// Suffix appended when output is cut to its budget
pub const TRUNCATION_MARKER: &str = "\n\n[truncated]";

/// Return at most the first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Cut `text` to `max_chars` characters and append [`TRUNCATION_MARKER`] when
/// anything was removed. Text within budget is returned unchanged.
pub fn truncate_with_marker(text: &str, max_chars: usize) -> String {
    let head = truncate_chars(text, max_chars);
    if head.len() == text.len() {
        text.to_string()
    } else {
        format!("{head}{TRUNCATION_MARKER}")
    }
}
