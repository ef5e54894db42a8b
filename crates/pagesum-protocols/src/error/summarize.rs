//! Summarization errors.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SummarizeError {
    #[error("API key is missing")]
    MissingApiKey,

    #[error("Invalid API key. Please check your settings.")]
    InvalidApiKeyFormat,

    #[error("No content to summarize")]
    NoContent,

    #[error("Not enough content to summarize on this page. Try a page with more text content.")]
    InsufficientContent { length: usize },

    #[error("Invalid API key or API key doesn't have permission to use Gemini API")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again in a few minutes.")]
    RateLimited,

    #[error("{0}")]
    QuotaExceeded(String),

    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("{0}")]
    Upstream(String),

    #[error("Unexpected API response format")]
    Format,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Already processing a request. Please wait.")]
    Busy,
}

impl SummarizeError {
    /// Whether the attempt may be repeated against the next model tier.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimited | Self::QuotaExceeded(_))
    }
}
