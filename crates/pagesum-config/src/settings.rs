//! User settings storage.
//!
//! Settings are kept as a small JSON document using the extension's storage
//! key names (`geminiApiKey`, `darkMode`).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, info};

use pagesum_protocols::error::SettingsError;
use pagesum_protocols::settings::{Settings, SettingsStore};

/// Shown when the user tries to save a blank key.
pub const INVALID_API_KEY_MESSAGE: &str = "Please enter a valid API key";

/// Settings stored in a JSON file. A missing file reads as defaults.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn get(&self) -> Result<Settings, SettingsError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(Settings::default()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings file at {}", self.path.display());
                Ok(Settings::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, settings: Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(&settings)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        debug!("Settings written to {}", self.path.display());
        Ok(())
    }
}

/// In-memory settings.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: Mutex<Settings>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Mutex::new(settings),
        }
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self::new(Settings {
            gemini_api_key: Some(api_key.into()),
            dark_mode: false,
        })
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self) -> Result<Settings, SettingsError> {
        Ok(self.settings.lock().clone())
    }

    async fn set(&self, settings: Settings) -> Result<(), SettingsError> {
        *self.settings.lock() = settings;
        Ok(())
    }
}

/// Save the API key and theme flag. The key is trimmed; a blank key is rejected.
pub async fn save_settings(
    store: &dyn SettingsStore,
    api_key: &str,
    dark_mode: bool,
) -> Result<Settings, SettingsError> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(SettingsError::Invalid(INVALID_API_KEY_MESSAGE.to_string()));
    }

    let settings = Settings {
        gemini_api_key: Some(api_key.to_string()),
        dark_mode,
    };
    store.set(settings.clone()).await?;
    info!("Settings saved successfully");
    Ok(settings)
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
