//! User settings shared between the options surface and the popup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Stored user settings. Field names match the extension's storage keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,

    #[serde(default)]
    pub dark_mode: bool,
}

impl Settings {
    /// The stored API key, if present and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Asynchronous key-value settings storage.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self) -> Result<Settings, SettingsError>;

    async fn set(&self, settings: Settings) -> Result<(), SettingsError>;
}
