//! Configuration schema definitions.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::loader::ConfigLoader;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub persona: PersonaConfig,

    #[serde(default)]
    pub extraction: ExtractionConfig,

    #[serde(default)]
    pub timeouts: TimeoutConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub settings: SettingsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Gemini API endpoint and model names per tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_primary_model")]
    pub primary_model: String,

    #[serde(default = "default_fallback1_model")]
    pub fallback1_model: String,

    #[serde(default = "default_fallback2_model")]
    pub fallback2_model: String,

    /// Per-request HTTP timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            primary_model: default_primary_model(),
            fallback1_model: default_fallback1_model(),
            fallback2_model: default_fallback2_model(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl GeminiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1".to_string()
}

fn default_primary_model() -> String {
    "gemini-1.5-pro".to_string()
}

fn default_fallback1_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_fallback2_model() -> String {
    "gemini-pro".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

/// Persona asset override. Without a path the bundled persona is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonaConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl PersonaConfig {
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path.as_deref().map(ConfigLoader::expand_path)
    }
}

/// Content limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Extracted page text is truncated to this many characters.
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,

    /// Pages with less text than this are rejected.
    #[serde(default = "default_min_content_chars")]
    pub min_content_chars: usize,

    /// Content embedded in the prompt is truncated to this many characters.
    #[serde(default = "default_max_prompt_chars")]
    pub max_prompt_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_content_chars: default_max_content_chars(),
            min_content_chars: default_min_content_chars(),
            max_prompt_chars: default_max_prompt_chars(),
        }
    }
}

fn default_max_content_chars() -> usize {
    10_000
}

fn default_min_content_chars() -> usize {
    50
}

fn default_max_prompt_chars() -> usize {
    30_000
}

/// Message and load timeouts, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_probe_ms")]
    pub probe_ms: u64,

    #[serde(default = "default_summarize_ms")]
    pub summarize_ms: u64,

    #[serde(default = "default_persona_ms")]
    pub persona_ms: u64,

    #[serde(default = "default_persona_attempts")]
    pub persona_attempts: u32,

    #[serde(default = "default_persona_retry_delay_ms")]
    pub persona_retry_delay_ms: u64,

    /// Wait after injection before the first message.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    #[serde(default = "default_page_load_ms")]
    pub page_load_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            probe_ms: default_probe_ms(),
            summarize_ms: default_summarize_ms(),
            persona_ms: default_persona_ms(),
            persona_attempts: default_persona_attempts(),
            persona_retry_delay_ms: default_persona_retry_delay_ms(),
            settle_ms: default_settle_ms(),
            page_load_ms: default_page_load_ms(),
        }
    }
}

impl TimeoutConfig {
    pub fn probe(&self) -> Duration {
        Duration::from_millis(self.probe_ms)
    }

    pub fn summarize(&self) -> Duration {
        Duration::from_millis(self.summarize_ms)
    }

    pub fn persona(&self) -> Duration {
        Duration::from_millis(self.persona_ms)
    }

    pub fn persona_retry_delay(&self) -> Duration {
        Duration::from_millis(self.persona_retry_delay_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn page_load(&self) -> Duration {
        Duration::from_millis(self.page_load_ms)
    }
}

fn default_probe_ms() -> u64 {
    3_000
}

fn default_summarize_ms() -> u64 {
    30_000
}

fn default_persona_ms() -> u64 {
    5_000
}

fn default_persona_attempts() -> u32 {
    3
}

fn default_persona_retry_delay_ms() -> u64 {
    1_000
}

fn default_settle_ms() -> u64 {
    1_500
}

fn default_page_load_ms() -> u64 {
    20_000
}

/// Rate-limit retry policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1_000
}

fn default_max_delay_ms() -> u64 {
    8_000
}

/// Where user settings are stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    #[serde(default = "default_settings_path")]
    pub path: String,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            path: default_settings_path(),
        }
    }
}

impl SettingsConfig {
    pub fn resolved_path(&self) -> PathBuf {
        ConfigLoader::expand_path(&self.path)
    }
}

fn default_settings_path() -> String {
    "~/.pagesum/settings.json".to_string()
}

/// Log output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_dir")]
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: default_log_dir(),
        }
    }
}

impl LoggingConfig {
    pub fn resolved_dir(&self) -> PathBuf {
        ConfigLoader::expand_path(&self.dir)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "~/.pagesum/logs".to_string()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
