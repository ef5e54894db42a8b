//! Page loading over HTTP.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Request failed: {0}")]
    Request(String),
}

/// A fetched document.
#[derive(Debug, Clone)]
pub struct LoadedPage {
    /// Final URL after redirects.
    pub url: String,
    pub status: u16,
    pub html: String,
}

/// HTTP client used to load pages into tabs.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pagesum/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;
        Ok(Self { client })
    }

    /// GET an http(s) page. Non-2xx responses are returned like any other page.
    pub async fn fetch(&self, url: &str) -> Result<LoadedPage, FetchError> {
        let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::UnsupportedScheme(parsed.scheme().to_string()));
        }

        debug!("Fetching page {}", parsed);

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        if !response.status().is_success() {
            warn!("Page {} answered with status {}", final_url, status);
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::Request(format!("Failed to read body: {}", e)))?;

        Ok(LoadedPage {
            url: final_url,
            status,
            html,
        })
    }
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
