//! Summarization backend protocol.

use async_trait::async_trait;

use crate::error::SummarizeError;
use crate::types::{PageContent, SummaryLength};

/// Turns page content plus a persona into a summary.
#[async_trait]
pub trait SummaryBackend: Send + Sync {
    async fn summarize(
        &self,
        page: &PageContent,
        persona: &str,
        summary_length: SummaryLength,
        api_key: &str,
    ) -> Result<String, SummarizeError>;
}
