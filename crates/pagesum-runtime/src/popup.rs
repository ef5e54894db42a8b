//! Popup context: the summarize trigger.
//!
//! The view is published on a `watch` channel so a frontend can render the
//! button and status line while an attempt runs.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, error, info};

use pagesum_protocols::browser::Browser;
use pagesum_protocols::error::TriggerError;
use pagesum_protocols::message::{Request, Response};
use pagesum_protocols::settings::SettingsStore;
use pagesum_protocols::types::SummaryLength;

/// URL prefixes of browser-internal pages.
pub const RESTRICTED_PREFIXES: [&str; 6] = [
    "chrome://",
    "chrome-extension://",
    "edge://",
    "about:",
    "moz-extension://",
    "safari-extension://",
];

const BUTTON_IDLE: &str = "Summarize";
const BUTTON_BUSY: &str = "Processing...";

/// Reject pages the content script cannot run on.
pub fn check_page_access(url: &str) -> Result<(), TriggerError> {
    if RESTRICTED_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
    {
        return Err(TriggerError::RestrictedPage(url.to_string()));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(TriggerError::NotWebPage(url.to_string()));
    }
    Ok(())
}

/// Text shown in the result area for an attempt's outcome.
pub fn render(result: &Result<String, TriggerError>) -> String {
    match result {
        Ok(summary) => summary.clone(),
        Err(e) => format!("Error: {}", e),
    }
}

/// Button and status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupView {
    pub button_enabled: bool,
    pub button_label: String,
    pub status: String,
}

impl Default for PopupView {
    fn default() -> Self {
        Self {
            button_enabled: true,
            button_label: BUTTON_IDLE.to_string(),
            status: String::new(),
        }
    }
}

/// Message timeouts used by the popup.
#[derive(Debug, Clone)]
pub struct PopupConfig {
    /// Wait between injection and the first message.
    pub settle: Duration,
    pub probe_timeout: Duration,
    pub summarize_timeout: Duration,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(1500),
            probe_timeout: Duration::from_secs(3),
            summarize_timeout: Duration::from_secs(30),
        }
    }
}

pub struct Popup {
    browser: Arc<dyn Browser>,
    settings: Arc<dyn SettingsStore>,
    config: PopupConfig,
    view: watch::Sender<PopupView>,
}

impl Popup {
    pub fn new(
        browser: Arc<dyn Browser>,
        settings: Arc<dyn SettingsStore>,
        config: PopupConfig,
    ) -> Self {
        let (view, _) = watch::channel(PopupView::default());
        Self {
            browser,
            settings,
            config,
            view,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PopupView> {
        self.view.subscribe()
    }

    pub fn view(&self) -> PopupView {
        self.view.borrow().clone()
    }

    /// Run one summarize attempt against the active tab.
    ///
    /// The button is disabled for the duration and re-enabled on every
    /// outcome. A click while disabled fails with [`TriggerError::Busy`].
    pub async fn summarize(&self, summary_length: SummaryLength) -> Result<String, TriggerError> {
        let claimed = self.view.send_if_modified(|view| {
            if !view.button_enabled {
                return false;
            }
            view.button_enabled = false;
            view.button_label = BUTTON_BUSY.to_string();
            view.status = "Checking page access...".to_string();
            true
        });
        if !claimed {
            return Err(TriggerError::Busy);
        }

        let result = self.run(summary_length).await;
        if let Err(e) = &result {
            error!("Popup error: {}", e);
        }

        let status = render(&result);
        self.view.send_modify(|view| {
            view.button_enabled = true;
            view.button_label = BUTTON_IDLE.to_string();
            view.status = status;
        });
        result
    }

    async fn run(&self, summary_length: SummaryLength) -> Result<String, TriggerError> {
        let tab = self.browser.active_tab().await?;
        info!("Current tab: {}", tab.url);
        check_page_access(&tab.url)?;

        self.set_status("Checking API key...");
        let settings = self.settings.get().await?;
        let api_key = settings
            .api_key()
            .ok_or(TriggerError::MissingApiKey)?
            .to_string();

        self.set_status("Injecting content script...");
        self.browser.inject_content_script(tab.id).await?;

        self.set_status("Initializing...");
        if !self.config.settle.is_zero() {
            tokio::time::sleep(self.config.settle).await;
        }

        self.set_status("Testing connection...");
        let pong = self
            .browser
            .send_to_tab(tab.id, Request::Ping, self.config.probe_timeout)
            .await
            .map_err(TriggerError::ContentScriptUnavailable)?;
        debug!("Ping successful: {:?}", pong);

        self.set_status("Generating summary...");
        let request = Request::summarize(summary_length, api_key);
        match self
            .browser
            .send_to_tab(tab.id, request, self.config.summarize_timeout)
            .await
        {
            Ok(Response::Summary { summary }) if !summary.is_empty() => Ok(summary),
            Ok(Response::Error { error }) => Err(TriggerError::Summarization(error)),
            Ok(_) => Err(TriggerError::Summarization(
                "Failed to generate summary. Please try again.".to_string(),
            )),
            Err(e) => Err(TriggerError::Summarization(e.to_string())),
        }
    }

    fn set_status(&self, status: &str) {
        debug!("{}", status);
        self.view.send_modify(|view| view.status = status.to_string());
    }
}

impl std::fmt::Debug for Popup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Popup")
            .field("config", &self.config)
            .field("view", &*self.view.borrow())
            .finish()
    }
}

#[cfg(test)]
#[path = "popup_tests.rs"]
mod tests;
