//! Shared test doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use pagesum_protocols::error::SummarizeError;
use pagesum_protocols::provider::SummaryBackend;
use pagesum_protocols::types::{PageContent, SummaryLength};

/// Records calls and returns a fixed result.
pub struct MockBackend {
    pub calls: AtomicUsize,
    pub personas: Mutex<Vec<String>>,
    pub pages: Mutex<Vec<PageContent>>,
    delay: Duration,
    result: Result<String, SummarizeError>,
}

impl MockBackend {
    pub fn returning(summary: &str) -> Arc<Self> {
        Self::build(Ok(summary.to_string()), Duration::ZERO)
    }

    pub fn failing(error: SummarizeError) -> Arc<Self> {
        Self::build(Err(error), Duration::ZERO)
    }

    pub fn slow(summary: &str, delay: Duration) -> Arc<Self> {
        Self::build(Ok(summary.to_string()), delay)
    }

    fn build(result: Result<String, SummarizeError>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            personas: Mutex::new(Vec::new()),
            pages: Mutex::new(Vec::new()),
            delay,
            result,
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SummaryBackend for MockBackend {
    async fn summarize(
        &self,
        page: &PageContent,
        persona: &str,
        _summary_length: SummaryLength,
        _api_key: &str,
    ) -> Result<String, SummarizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.personas.lock().push(persona.to_string());
        self.pages.lock().push(page.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.result.clone()
    }
}

/// An article long enough to summarize.
pub fn article_html() -> String {
    format!(
        "<html><head><title>Rust Ownership</title></head><body>\
         <nav>Home</nav><article><p>{}</p></article></body></html>",
        "Ownership rules decide when memory is freed. ".repeat(10)
    )
}

pub const API_KEY: &str = "AIzaSyTestKey123";
