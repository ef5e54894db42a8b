//! Browser host errors.

use thiserror::Error;

use crate::browser::TabId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BrowserError {
    #[error("No active tab")]
    NoActiveTab,

    #[error("No tab with id: {0}")]
    TabNotFound(TabId),

    #[error("Script injection failed: {0}")]
    InjectionFailed(String),

    #[error("Failed to load page {url}: {message}")]
    LoadFailed { url: String, message: String },
}
