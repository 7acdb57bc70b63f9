//! HTML to plain text conversion
//!
//! Filing pages are flattened to a single line of text with links dropped.
//! General web pages keep their line structure and link targets.

use scraper::{ElementRef, Html};

const SKIPPED: &[&str] = &["script", "style", "noscript", "head", "template", "svg"];

const BLOCKS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "tr", "ul",
];

/// Rendering options
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    /// Append `(url)` after link text
    pub keep_links: bool,
}

enum Step<'a> {
    Text(&'a str),
    Open(ElementRef<'a>),
    Close(ElementRef<'a>),
}

fn children(element: ElementRef<'_>) -> Vec<Step<'_>> {
    element
        .children()
        .filter_map(|child| match child.value().as_text() {
            Some(text) => {
                let text: &str = text;
                Some(Step::Text(text))
            }
            None => ElementRef::wrap(child).map(Step::Open),
        })
        .collect()
}

/// Depth-first walk on an explicit stack; page nesting depth is untrusted
fn render(root: ElementRef<'_>, options: TextOptions, out: &mut String) {
    let mut stack: Vec<Step<'_>> = children(root).into_iter().rev().collect();

    while let Some(step) = stack.pop() {
        match step {
            Step::Text(text) => out.push_str(text),
            Step::Open(element) => {
                let name = element.value().name();
                if SKIPPED.contains(&name) {
                    continue;
                }
                if BLOCKS.contains(&name) {
                    out.push('\n');
                }
                stack.push(Step::Close(element));
                stack.extend(children(element).into_iter().rev());
            }
            Step::Close(element) => {
                let name = element.value().name();
                if name == "a" && options.keep_links {
                    if let Some(href) = element.value().attr("href").map(str::trim) {
                        if !href.is_empty() && !href.starts_with('#') {
                            out.push_str(" (");
                            out.push_str(href);
                            out.push(')');
                        }
                    }
                }
                if BLOCKS.contains(&name) {
                    out.push('\n');
                } else if matches!(name, "td" | "th") {
                    out.push(' ');
                }
            }
        }
    }
}

/// Raw rendered text, whitespace untouched
pub fn html_to_text(html: &str, options: TextOptions) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();
    render(document.root_element(), options, &mut out);
    out
}

/// Single-line text for snippet search: links dropped, whitespace runs collapsed
pub fn filing_text(html: &str) -> String {
    collapse_whitespace(&html_to_text(html, TextOptions::default()))
}

/// Readable page text: link targets kept, lines trimmed, at most one blank line
/// between paragraphs
pub fn page_text(html: &str) -> String {
    let raw = html_to_text(html, TextOptions { keep_links: true });
    let mut out = String::new();
    let mut blank_run = 0;
    for line in raw.lines() {
        let line = collapse_whitespace(line);
        if line.is_empty() {
            blank_run += 1;
            continue;
        }
        if !out.is_empty() {
            out.push_str(if blank_run > 0 { "\n\n" } else { "\n" });
        }
        out.push_str(&line);
        blank_run = 0;
    }
    out
}

/// Replace every whitespace run with a single space and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
