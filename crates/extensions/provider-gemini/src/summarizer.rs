//! Summarization with model-tier fallback on rate limiting.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use pagesum_protocols::error::SummarizeError;
use pagesum_protocols::provider::SummaryBackend;
use pagesum_protocols::types::{PageContent, SummaryLength};

use crate::client::{GeminiClient, DEFAULT_BASE_URL};
use crate::prompt::{build_prompt, MAX_PROMPT_CONTENT_CHARS};
use crate::tier::{ModelSet, ModelTier};
use crate::types::GenerateContentRequest;

/// Keys shorter than this are rejected without calling the API.
const MIN_API_KEY_LEN: usize = 10;

/// Exponential backoff between rate-limited attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub base: Duration,
    pub max: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(1000),
            max: Duration::from_millis(8000),
        }
    }
}

impl Backoff {
    /// Delay before retry `retry` (1-based): `base * 2^(retry-1)`, capped at `max`.
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        if retry == 0 {
            return Duration::ZERO;
        }
        let factor = 2u32.saturating_pow(retry - 1);
        self.base.saturating_mul(factor).min(self.max)
    }
}

/// Summarizer configuration.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    pub base_url: String,
    pub models: ModelSet,
    pub max_retries: u32,
    pub backoff: Backoff,
    pub request_timeout: Duration,
    pub max_content_chars: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            models: ModelSet::default(),
            max_retries: 3,
            backoff: Backoff::default(),
            request_timeout: Duration::from_secs(60),
            max_content_chars: MAX_PROMPT_CONTENT_CHARS,
        }
    }
}

/// Gemini-backed summarizer.
#[derive(Debug, Clone)]
pub struct GeminiSummarizer {
    client: GeminiClient,
    config: SummarizerConfig,
}

impl GeminiSummarizer {
    pub fn new(config: SummarizerConfig) -> Result<Self, SummarizeError> {
        let client = GeminiClient::new(config.base_url.clone(), config.request_timeout)?;
        Ok(Self { client, config })
    }

    /// Summarize `page` in the persona's voice.
    pub async fn summarize(
        &self,
        page: &PageContent,
        persona: &str,
        summary_length: SummaryLength,
        api_key: &str,
    ) -> Result<String, SummarizeError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(SummarizeError::MissingApiKey);
        }
        if api_key.chars().count() < MIN_API_KEY_LEN {
            return Err(SummarizeError::InvalidApiKeyFormat);
        }
        if page.content.trim().is_empty() {
            return Err(SummarizeError::NoContent);
        }

        let prompt = build_prompt(page, persona, summary_length, self.config.max_content_chars);
        let mut tier = ModelTier::Primary;
        let mut retry = 0;

        loop {
            if retry > 0 {
                let delay = self.config.backoff.delay_for_retry(retry);
                debug!("Waiting {:?} before retry {}", delay, retry);
                sleep(delay).await;
            }

            let model = self.config.models.name(tier);
            let request = GenerateContentRequest::from_prompt(prompt.as_str(), tier.generation_config());

            match self.client.generate_content(model, api_key, &request).await {
                Ok(response) => {
                    let summary = response.first_text().ok_or(SummarizeError::Format)?;
                    info!(
                        "Summary generated with model {} ({} chars)",
                        model,
                        summary.chars().count()
                    );
                    return Ok(summary.to_string());
                }
                Err(e) if e.is_rate_limit() && retry < self.config.max_retries => {
                    retry += 1;
                    tier = tier.next();
                    warn!(
                        "{}; retrying with model {} (attempt {}/{})",
                        e,
                        self.config.models.name(tier),
                        retry,
                        self.config.max_retries
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl SummaryBackend for GeminiSummarizer {
    async fn summarize(
        &self,
        page: &PageContent,
        persona: &str,
        summary_length: SummaryLength,
        api_key: &str,
    ) -> Result<String, SummarizeError> {
        GeminiSummarizer::summarize(self, page, persona, summary_length, api_key).await
    }
}

#[cfg(test)]
#[path = "summarizer_tests.rs"]
mod tests;
