//! Heuristic relevance window over filing text
//!
//! The query is split into ASCII alphanumeric terms of three or more characters.
//! The window is anchored on the earliest occurrence of any of the first few
//! terms. There is no scoring or stemming: the leftmost hit wins regardless of
//! which term produced it.

use research_utils::truncate_chars;

/// Window geometry, in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnippetWindow {
    /// Only the first `max_terms` query terms are searched
    pub max_terms: usize,
    /// Characters kept before the match
    pub before: usize,
    /// Characters kept from the match onward
    pub after: usize,
    /// Prefix length returned when nothing matches
    pub default_len: usize,
}

impl SnippetWindow {
    /// Used when assembling report context
    pub const FILING: SnippetWindow = SnippetWindow {
        max_terms: 10,
        before: 250,
        after: 900,
        default_len: 1000,
    };

    /// Used by the standalone filing search tool
    pub const COMPACT: SnippetWindow = SnippetWindow {
        max_terms: 8,
        before: 250,
        after: 850,
        default_len: 900,
    };
}

impl Default for SnippetWindow {
    fn default() -> Self {
        Self::FILING
    }
}

/// Lower-cased search terms in query order
pub fn query_terms(query: &str) -> Vec<String> {
    query
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| t.len() >= 3)
        .map(str::to_ascii_lowercase)
        .collect()
}

/// Character offset of the earliest occurrence of any searched term
fn first_match(text: &str, query: &str, max_terms: usize) -> Option<usize> {
    // ASCII lowering keeps byte offsets identical to `text`
    let lower = text.to_ascii_lowercase();
    let byte_idx = query_terms(query)
        .iter()
        .take(max_terms)
        .filter_map(|term| lower.find(term.as_str()))
        .min()?;
    Some(text[..byte_idx].chars().count())
}

fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let mut indices = text.char_indices().map(|(i, _)| i).chain(Some(text.len()));
    let from = indices.nth(start).unwrap_or(text.len());
    let to = if end > start {
        indices.nth(end - start - 1).unwrap_or(text.len())
    } else {
        from
    };
    &text[from..to]
}

/// Return the window of `text` most relevant to `query`.
///
/// With a match at character offset `i` the result spans
/// `max(0, i - before) .. min(len, i + after)`; without one it is the first
/// `default_len` characters.
pub fn extract_snippet<'a>(text: &'a str, query: &str, window: SnippetWindow) -> &'a str {
    match first_match(text, query, window.max_terms) {
        None => truncate_chars(text, window.default_len),
        Some(i) => {
            let total = text.chars().count();
            let start = i.saturating_sub(window.before);
            let end = total.min(i + window.after);
            char_slice(text, start, end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUERY: &str = "MD&A guidance risks cash flow liquidity outlook";

    fn filler(n: usize) -> String {
        "x".repeat(n)
    }

    #[test]
    fn test_query_terms() {
        assert_eq!(
            query_terms(QUERY),
            vec!["guidance", "risks", "cash", "flow", "liquidity", "outlook"]
        );
        assert!(query_terms("a an to").is_empty());
    }

    #[test]
    fn test_window_in_middle() {
        let text = format!("{}LIQUIDITY{}", filler(1000), filler(2000));
        let snippet = extract_snippet(&text, QUERY, SnippetWindow::FILING);

        let i = 1000;
        assert_eq!(snippet, &text[i - 250..i + 900]);
        assert!(snippet.contains("LIQUIDITY"));
    }

    #[test]
    fn test_window_clamped_at_start() {
        let text = format!("{}risks{}", filler(100), filler(3000));
        let snippet = extract_snippet(&text, QUERY, SnippetWindow::FILING);
        assert_eq!(snippet, &text[..100 + 900]);
    }

    #[test]
    fn test_window_clamped_at_end() {
        let text = format!("{}outlook{}", filler(2000), filler(20));
        let snippet = extract_snippet(&text, QUERY, SnippetWindow::COMPACT);
        assert_eq!(snippet, &text[2000 - 250..]);
    }

    #[test]
    fn test_no_match_returns_prefix() {
        let text = filler(5000);
        assert_eq!(extract_snippet(&text, QUERY, SnippetWindow::FILING).len(), 1000);
        assert_eq!(extract_snippet(&text, QUERY, SnippetWindow::COMPACT), &text[..900]);
        assert_eq!(extract_snippet("short", QUERY, SnippetWindow::FILING), "short");
    }

    #[test]
    fn test_leftmost_occurrence_wins_over_term_order() {
        // "outlook" is the last term but appears first in the text
        let text = format!("{}outlook{}guidance{}", filler(300), filler(300), filler(2000));
        let snippet = extract_snippet(&text, QUERY, SnippetWindow::FILING);
        assert_eq!(snippet, &text[300 - 250..300 + 900]);
    }

    #[test]
    fn test_only_first_terms_are_searched() {
        let query = "aaa1 aaa2 aaa3 aaa4 aaa5 aaa6 aaa7 aaa8 needle";
        let text = format!("{}needle{}", filler(400), filler(2000));

        // ninth term is ignored by the compact window
        let compact = extract_snippet(&text, query, SnippetWindow::COMPACT);
        assert_eq!(compact, &text[..900]);

        // but searched by the filing window
        let filing = extract_snippet(&text, query, SnippetWindow::FILING);
        assert_eq!(filing, &text[400 - 250..400 + 900]);
    }

    #[test]
    fn test_offsets_are_characters() {
        let text = format!("{}Guidance{}", "é".repeat(300), "ü".repeat(1000));
        let snippet = extract_snippet(&text, QUERY, SnippetWindow::FILING);

        assert_eq!(snippet.chars().count(), 250 + 900);
        assert!(snippet.starts_with('é'));
        assert_eq!(snippet.chars().nth(250), Some('G'));
    }
}
