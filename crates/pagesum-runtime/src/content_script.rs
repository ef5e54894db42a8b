//! Content-script context: extracts the page and produces the summary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use pagesum_protocols::error::{PersonaError, SummarizeError};
use pagesum_protocols::message::{Request, Response};
use pagesum_protocols::port::{MessageListener, MessagePort};
use pagesum_protocols::provider::SummaryBackend;
use pagesum_protocols::types::SummaryLength;
use pagesum_tools_web::{extract_with_limit, MAX_CONTENT_CHARS};

use crate::persona::FALLBACK_PERSONA;

/// Keys shorter than this (after trimming) are rejected.
const MIN_API_KEY_LEN: usize = 10;

/// Limits and persona retry policy for injected scripts.
#[derive(Debug, Clone)]
pub struct ContentScriptConfig {
    pub max_content_chars: usize,
    pub min_content_chars: usize,
    pub persona_attempts: u32,
    pub persona_timeout: Duration,
    pub persona_retry_delay: Duration,
}

impl Default for ContentScriptConfig {
    fn default() -> Self {
        Self {
            max_content_chars: MAX_CONTENT_CHARS,
            min_content_chars: 50,
            persona_attempts: 3,
            persona_timeout: Duration::from_secs(5),
            persona_retry_delay: Duration::from_secs(1),
        }
    }
}

/// Script injected into a page.
pub struct ContentScript {
    document: Arc<str>,
    runtime: Arc<MessagePort>,
    backend: Arc<dyn SummaryBackend>,
    config: ContentScriptConfig,
    processing: AtomicBool,
}

impl ContentScript {
    pub fn new(
        document: Arc<str>,
        runtime: Arc<MessagePort>,
        backend: Arc<dyn SummaryBackend>,
        config: ContentScriptConfig,
    ) -> Self {
        Self {
            document,
            runtime,
            backend,
            config,
            processing: AtomicBool::new(false),
        }
    }

    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }

    async fn handle_summarize(&self, summary_length: SummaryLength, api_key: &str) -> Response {
        if self.processing.swap(true, Ordering::AcqRel) {
            info!("Already processing a request");
            return Response::error(SummarizeError::Busy);
        }
        let _processing = ProcessingGuard(&self.processing);

        let page = extract_with_limit(&self.document, self.config.max_content_chars);
        let length = page.content_len();
        if length < self.config.min_content_chars {
            info!("Insufficient content ({} chars)", length);
            return Response::error(SummarizeError::InsufficientContent { length });
        }
        debug!(title = %page.title, content_length = length, "Extracted page content");

        if api_key.trim().chars().count() < MIN_API_KEY_LEN {
            return Response::error(SummarizeError::InvalidApiKeyFormat);
        }

        let persona = match self.persona_with_retry().await {
            Ok(persona) => persona,
            Err(e) => {
                error!("Failed to get persona: {}", e);
                FALLBACK_PERSONA.to_string()
            }
        };

        match self
            .backend
            .summarize(&page, &persona, summary_length, api_key)
            .await
        {
            Ok(summary) => {
                info!("Summary generated successfully");
                Response::summary(summary)
            }
            Err(e) => {
                error!("Error generating summary: {}", e);
                Response::error(format!("Failed to generate summary: {}", e))
            }
        }
    }

    /// Ask the background context for the persona, retrying on failure.
    async fn persona_with_retry(&self) -> Result<String, PersonaError> {
        let attempts = self.config.persona_attempts.max(1);
        let mut attempt = 1;
        loop {
            debug!("Attempting to get persona ({}/{})", attempt, attempts);
            let failure = match self
                .runtime
                .send(Request::GetPersona, self.config.persona_timeout)
                .await
            {
                Ok(Response::Persona { persona, .. }) if !persona.is_empty() => return Ok(persona),
                Ok(Response::Error { error }) => error,
                Ok(_) => "No persona received".to_string(),
                Err(e) => e.to_string(),
            };

            warn!("Persona attempt {} failed: {}", attempt, failure);
            if attempt >= attempts {
                return Err(PersonaError::Unavailable {
                    attempts,
                    message: failure,
                });
            }
            attempt += 1;
            tokio::time::sleep(self.config.persona_retry_delay).await;
        }
    }
}

#[async_trait]
impl MessageListener for ContentScript {
    async fn on_message(&self, request: Request) -> Option<Response> {
        debug!("Received message: {}", request.action());
        match request {
            Request::Ping => Some(Response::pong()),
            Request::Summarize {
                summary_length,
                api_key,
            } => Some(self.handle_summarize(summary_length, &api_key).await),
            Request::GetPersona => None,
        }
    }
}

impl std::fmt::Debug for ContentScript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentScript")
            .field("document_len", &self.document.len())
            .field("processing", &self.is_processing())
            .finish()
    }
}

struct ProcessingGuard<'a>(&'a AtomicBool);

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "content_script_tests.rs"]
mod tests;
