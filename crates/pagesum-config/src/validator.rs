//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_gemini(config, &mut result);
        Self::validate_extraction(config, &mut result);
        Self::validate_timeouts(config, &mut result);
        Self::validate_retry(config, &mut result);
        Self::validate_persona(config, &mut result);

        Ok(result)
    }

    /// Validate and turn the first error into a [`ConfigError`].
    pub fn ensure_valid(config: &Config) -> Result<ValidationResult, ConfigError> {
        let result = Self::validate(config)?;
        if let Some(error) = result.errors.first() {
            return Err(ConfigError::InvalidValue {
                field: error.path.clone(),
                message: error.message.clone(),
            });
        }
        Ok(result)
    }

    fn validate_gemini(config: &Config, result: &mut ValidationResult) {
        let gemini = &config.gemini;
        if !gemini.base_url.starts_with("http://") && !gemini.base_url.starts_with("https://") {
            result.add_error(ValidationError::new(
                "gemini.base_url",
                "base_url must start with http:// or https://",
            ));
        }

        let models = [
            ("gemini.primary_model", &gemini.primary_model),
            ("gemini.fallback1_model", &gemini.fallback1_model),
            ("gemini.fallback2_model", &gemini.fallback2_model),
        ];
        for (path, model) in models {
            if model.trim().is_empty() {
                result.add_error(ValidationError::new(path, "Model name cannot be empty"));
            }
        }

        if gemini.request_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "gemini.request_timeout_secs",
                "request_timeout_secs must be greater than 0",
            ));
        }
    }

    fn validate_extraction(config: &Config, result: &mut ValidationResult) {
        let extraction = &config.extraction;
        if extraction.max_content_chars == 0 {
            result.add_error(ValidationError::new(
                "extraction.max_content_chars",
                "max_content_chars must be greater than 0",
            ));
        }
        if extraction.min_content_chars > extraction.max_content_chars {
            result.add_error(ValidationError::new(
                "extraction.min_content_chars",
                "min_content_chars cannot exceed max_content_chars",
            ));
        }
        if extraction.max_prompt_chars < extraction.max_content_chars {
            result.add_warning(ValidationWarning::new(
                "extraction.max_prompt_chars",
                "max_prompt_chars is below max_content_chars, page text will be cut twice",
            ));
        }
    }

    fn validate_timeouts(config: &Config, result: &mut ValidationResult) {
        let timeouts = &config.timeouts;
        let required = [
            ("timeouts.probe_ms", timeouts.probe_ms),
            ("timeouts.summarize_ms", timeouts.summarize_ms),
            ("timeouts.persona_ms", timeouts.persona_ms),
            ("timeouts.page_load_ms", timeouts.page_load_ms),
        ];
        for (path, value) in required {
            if value == 0 {
                result.add_error(ValidationError::new(path, "Timeout must be greater than 0"));
            }
        }

        if timeouts.persona_attempts == 0 {
            result.add_error(ValidationError::new(
                "timeouts.persona_attempts",
                "persona_attempts must be at least 1",
            ));
        }

        let total_backoff: u64 = (1..=config.retry.max_retries)
            .map(|n| {
                let factor = 1u64 << (n - 1).min(20);
                config.retry.base_delay_ms.saturating_mul(factor).min(config.retry.max_delay_ms)
            })
            .sum();
        if timeouts.summarize_ms <= total_backoff {
            result.add_warning(ValidationWarning::new(
                "timeouts.summarize_ms",
                format!(
                    "summarize timeout ({} ms) is shorter than the total retry backoff ({} ms)",
                    timeouts.summarize_ms, total_backoff
                ),
            ));
        }
    }

    fn validate_retry(config: &Config, result: &mut ValidationResult) {
        let retry = &config.retry;
        if retry.max_delay_ms < retry.base_delay_ms {
            result.add_error(ValidationError::new(
                "retry.max_delay_ms",
                "max_delay_ms cannot be smaller than base_delay_ms",
            ));
        }
        if retry.max_retries > 10 {
            result.add_warning(ValidationWarning::new(
                "retry.max_retries",
                "max_retries is very high (>10), a rate-limited request may run for minutes",
            ));
        }
    }

    fn validate_persona(config: &Config, result: &mut ValidationResult) {
        let Some(path) = config.persona.resolved_path() else {
            return;
        };
        if !path.exists() {
            result.add_warning(ValidationWarning::new(
                "persona.path",
                format!("Persona file does not exist, the fallback persona will be used: {:?}", path),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
