//! Popup trigger errors.

use thiserror::Error;

use super::{BrowserError, MessageError, SettingsError};

#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("Cannot access browser internal pages. Please try a different website.")]
    RestrictedPage(String),

    #[error("Can only summarize web pages (http/https). Please navigate to a website first.")]
    NotWebPage(String),

    #[error("Please set your Gemini API key in the extension options first.")]
    MissingApiKey,

    #[error("{0}")]
    Browser(#[from] BrowserError),

    #[error("Content script failed to load. Please refresh the page and try again.")]
    ContentScriptUnavailable(#[source] MessageError),

    #[error("Summarization failed: {0}")]
    Summarization(String),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("A summary is already being generated")]
    Busy,
}
