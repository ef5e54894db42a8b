//! Gemini API client.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, error};

use pagesum_protocols::error::SummarizeError;

use crate::types::*;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1";

/// Gemini API client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    /// Create a client for the given API root.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SummarizeError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()
            .map_err(|e| SummarizeError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Generate content (non-streaming).
    ///
    /// Status handling: 403 is an invalid key, 429 a rate limit, any other
    /// non-2xx is reported with its body. A 2xx body carrying an `error`
    /// object is a quota error when it says so, otherwise an upstream error.
    pub async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, SummarizeError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        debug!("Gemini generate_content: model={}", model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await
            .map_err(|e| SummarizeError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SummarizeError::Network(e.without_url().to_string()))?;

        if !status.is_success() {
            error!("Gemini API response not OK: {} {}", status.as_u16(), body);
            return Err(match status {
                StatusCode::FORBIDDEN => SummarizeError::InvalidApiKey,
                StatusCode::TOO_MANY_REQUESTS => SummarizeError::RateLimited,
                _ => SummarizeError::Api {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse Gemini response: {}", e);
            SummarizeError::Format
        })?;

        if let Some(detail) = &parsed.error {
            error!("Gemini API returned error: {:?}", detail);
            let message = detail
                .message
                .clone()
                .unwrap_or_else(|| "Failed to generate summary".to_string());
            return Err(if detail.is_quota() {
                SummarizeError::QuotaExceeded(message)
            } else {
                SummarizeError::Upstream(message)
            });
        }

        Ok(parsed)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
