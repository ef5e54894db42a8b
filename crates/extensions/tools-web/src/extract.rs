//! Visible-text extraction from an HTML document.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use pagesum_protocols::types::{collapse_whitespace, truncate_with_ellipsis, PageContent};

/// Structural containers tried in order; only the first match of each is considered.
pub const CONTENT_SELECTORS: [&str; 8] = [
    "article",
    "main",
    ".content",
    "#content",
    ".article",
    ".post",
    ".entry",
    "[role='main']",
];

/// A container must hold more than this many characters to be used.
pub const MIN_STRUCTURED_CHARS: usize = 100;

/// Extracted content is cut to this many characters.
pub const MAX_CONTENT_CHARS: usize = 10_000;

static CANDIDATES: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    CONTENT_SELECTORS
        .iter()
        .filter_map(|css| Selector::parse(css).ok())
        .collect()
});

static TITLE: LazyLock<Option<Selector>> = LazyLock::new(|| Selector::parse("title").ok());
static PARAGRAPH: LazyLock<Option<Selector>> = LazyLock::new(|| Selector::parse("p").ok());
static BODY: LazyLock<Option<Selector>> = LazyLock::new(|| Selector::parse("body").ok());

/// Extract the title and main text of a page.
pub fn extract_page_content(html: &str) -> PageContent {
    extract_with_limit(html, MAX_CONTENT_CHARS)
}

/// [`extract_page_content`] with an explicit character cap.
pub fn extract_with_limit(html: &str, max_chars: usize) -> PageContent {
    let document = Html::parse_document(html);
    let title = document_title(&document);

    let mut content = match structured_text(&document) {
        Some(text) => {
            debug!("Found content in structured element");
            text
        }
        None => {
            debug!("Extracting content from paragraphs");
            paragraph_text(&document)
        }
    };

    if content.trim().is_empty() {
        debug!("Falling back to body text");
        content = body_text(&document);
    }

    let content = truncate_with_ellipsis(&collapse_whitespace(&content), max_chars);
    debug!("Extracted content length: {}", content.chars().count());

    PageContent { title, content }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn first_text(document: &Html, selector: &Option<Selector>) -> Option<String> {
    let selector = selector.as_ref()?;
    document.select(selector).next().map(element_text)
}

fn document_title(document: &Html) -> String {
    first_text(document, &TITLE)
        .map(|title| collapse_whitespace(&title))
        .unwrap_or_default()
}

fn structured_text(document: &Html) -> Option<String> {
    CANDIDATES
        .iter()
        .filter_map(|selector| document.select(selector).next())
        .map(element_text)
        .find(|text| text.trim().chars().count() > MIN_STRUCTURED_CHARS)
}

fn paragraph_text(document: &Html) -> String {
    let Some(selector) = PARAGRAPH.as_ref() else {
        return String::new();
    };
    document
        .select(selector)
        .map(element_text)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn body_text(document: &Html) -> String {
    first_text(document, &BODY).unwrap_or_else(|| element_text(document.root_element()))
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
