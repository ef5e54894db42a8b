//! Wiring of the three contexts from configuration.

use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::info;

use pagesum_config::Config;
use pagesum_protocols::port::MessagePort;
use pagesum_protocols::provider::SummaryBackend;
use pagesum_protocols::settings::SettingsStore;
use pagesum_tools_web::{FetchError, PageFetcher};

use crate::background::BackgroundScript;
use crate::content_script::ContentScriptConfig;
use crate::host::{HeadlessBrowser, ScriptEnvironment};
use crate::persona::{
    AssetPersonaSource, Persona, PersonaLoader, PersonaSource, StaticPersonaSource, BUNDLED_PERSONA,
};
use crate::popup::{Popup, PopupConfig};

#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("Failed to create page fetcher: {0}")]
    Fetcher(#[from] FetchError),
}

impl From<&Config> for ContentScriptConfig {
    fn from(config: &Config) -> Self {
        Self {
            max_content_chars: config.extraction.max_content_chars,
            min_content_chars: config.extraction.min_content_chars,
            persona_attempts: config.timeouts.persona_attempts,
            persona_timeout: config.timeouts.persona(),
            persona_retry_delay: config.timeouts.persona_retry_delay(),
        }
    }
}

impl From<&Config> for PopupConfig {
    fn from(config: &Config) -> Self {
        Self {
            settle: config.timeouts.settle(),
            probe_timeout: config.timeouts.probe(),
            summarize_timeout: config.timeouts.summarize(),
        }
    }
}

/// Background context, browser host and popup wired together.
pub struct Extension {
    loader: Arc<PersonaLoader>,
    runtime: Arc<MessagePort>,
    browser: Arc<HeadlessBrowser>,
    popup: Popup,
}

impl Extension {
    /// Build with the bundled persona, or the file named by `[persona] path`.
    pub fn new(
        config: &Config,
        backend: Arc<dyn SummaryBackend>,
        settings: Arc<dyn SettingsStore>,
    ) -> Result<Self, ExtensionError> {
        let source: Arc<dyn PersonaSource> = match config.persona.resolved_path() {
            Some(path) => Arc::new(AssetPersonaSource::new(path)),
            None => Arc::new(StaticPersonaSource::new(BUNDLED_PERSONA)),
        };
        Self::with_persona_source(config, source, backend, settings)
    }

    pub fn with_persona_source(
        config: &Config,
        source: Arc<dyn PersonaSource>,
        backend: Arc<dyn SummaryBackend>,
        settings: Arc<dyn SettingsStore>,
    ) -> Result<Self, ExtensionError> {
        let loader = Arc::new(PersonaLoader::new(source));
        let runtime = BackgroundScript::install(Arc::clone(&loader));

        let scripts = ScriptEnvironment {
            runtime: Arc::clone(&runtime),
            backend,
            config: ContentScriptConfig::from(config),
        };
        let fetcher = PageFetcher::new(config.timeouts.page_load())?;
        let browser = Arc::new(HeadlessBrowser::new(fetcher, scripts));
        let popup = Popup::new(browser.clone(), settings, PopupConfig::from(config));

        Ok(Self {
            loader,
            runtime,
            browser,
            popup,
        })
    }

    /// Start the background context; the persona begins loading.
    pub fn start(&self) -> JoinHandle<Persona> {
        info!("Background script started");
        self.loader.start()
    }

    pub fn runtime_port(&self) -> &Arc<MessagePort> {
        &self.runtime
    }

    pub fn browser(&self) -> &Arc<HeadlessBrowser> {
        &self.browser
    }

    pub fn popup(&self) -> &Popup {
        &self.popup
    }
}

impl std::fmt::Debug for Extension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extension")
            .field("browser", &self.browser)
            .field("popup", &self.popup)
            .finish()
    }
}

#[cfg(test)]
#[path = "extension_tests.rs"]
mod tests;
