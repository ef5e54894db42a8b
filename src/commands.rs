//! Command handlers.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use pagesum_config::{save_settings, Config, FileSettingsStore};
use pagesum_protocols::message::{Request, Response};
use pagesum_protocols::settings::{Settings, SettingsStore};
use pagesum_protocols::types::SummaryLength;
use pagesum_provider_gemini::{Backoff, GeminiSummarizer, ModelSet, SummarizerConfig};
use pagesum_runtime::{render, Extension};

use crate::cli::SettingsAction;

type CommandResult = Result<ExitCode, Box<dyn std::error::Error>>;

/// Gemini backend settings taken from the config file.
pub(crate) fn summarizer_config(config: &Config) -> SummarizerConfig {
    SummarizerConfig {
        base_url: config.gemini.base_url.clone(),
        models: ModelSet {
            primary: config.gemini.primary_model.clone(),
            fallback1: config.gemini.fallback1_model.clone(),
            fallback2: config.gemini.fallback2_model.clone(),
        },
        max_retries: config.retry.max_retries,
        backoff: Backoff {
            base: Duration::from_millis(config.retry.base_delay_ms),
            max: Duration::from_millis(config.retry.max_delay_ms),
        },
        request_timeout: config.gemini.request_timeout(),
        max_content_chars: config.extraction.max_prompt_chars,
    }
}

fn build_extension(
    config: &Config,
    settings: Arc<dyn SettingsStore>,
) -> Result<Extension, Box<dyn std::error::Error>> {
    let summarizer = GeminiSummarizer::new(summarizer_config(config))?;
    Ok(Extension::new(config, Arc::new(summarizer), settings)?)
}

/// Warn when there is no key to summarize with.
pub(crate) async fn check_api_key(settings: &dyn SettingsStore) {
    match settings.get().await {
        Ok(stored) if stored.api_key().is_some() => {}
        Ok(_) => warn!("No Gemini API key stored. Run `pagesum settings set --api-key <KEY>`."),
        Err(e) => warn!("Failed to read settings: {}", e),
    }
}

pub(crate) async fn summarize(
    config: &Config,
    settings: Arc<dyn SettingsStore>,
    url: &str,
    summary_length: SummaryLength,
    html_file: Option<&Path>,
) -> CommandResult {
    let extension = build_extension(config, settings)?;
    let _persona = extension.start();

    match html_file {
        Some(path) => {
            let html = tokio::fs::read_to_string(path).await?;
            info!("Loaded {} from {}", url, path.display());
            extension.browser().open_document(url, html);
        }
        None => {
            extension.browser().open(url).await?;
        }
    }

    let result = extension.popup().summarize(summary_length).await;
    println!("{}", render(&result));
    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

pub(crate) async fn settings(store: &FileSettingsStore, action: SettingsAction) -> CommandResult {
    match action {
        SettingsAction::Show => {
            let stored = store.get().await?;
            print_settings(store.path(), &stored);
        }
        SettingsAction::Set { api_key, dark_mode } => {
            match save_settings(store, &api_key, dark_mode).await {
                Ok(saved) => {
                    println!("Settings saved successfully!");
                    print_settings(store.path(), &saved);
                }
                Err(e) => {
                    println!("{}", e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub(crate) async fn persona(config: &Config, settings: Arc<dyn SettingsStore>) -> CommandResult {
    let extension = build_extension(config, settings)?;
    let _persona = extension.start();

    let response = extension
        .runtime_port()
        .send(Request::GetPersona, config.timeouts.persona())
        .await?;
    match response {
        Response::Persona {
            persona, fallback, ..
        } => {
            if fallback {
                println!("(fallback persona)");
            }
            println!("{}", persona);
            Ok(ExitCode::SUCCESS)
        }
        other => {
            println!("Unexpected response: {:?}", other);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_settings(path: &Path, settings: &Settings) {
    println!("Settings file: {}", path.display());
    println!(
        "Gemini API key: {}",
        settings.api_key().map(mask_key).unwrap_or_else(|| "(not set)".to_string())
    );
    println!("Dark mode: {}", settings.dark_mode);
}

/// Show only the ends of a key.
pub(crate) fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
