//! Web page tools for pagesum.
//!
//! Provides page loading over HTTP and extraction of the visible text a
//! summary is built from.

mod extract;
mod fetch;

pub use extract::{
    extract_page_content, extract_with_limit, CONTENT_SELECTORS, MAX_CONTENT_CHARS,
    MIN_STRUCTURED_CHARS,
};
pub use fetch::{FetchError, LoadedPage, PageFetcher};
