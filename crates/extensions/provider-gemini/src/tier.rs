//! Model tiers tried in order when the API rate limits.

use serde::{Deserialize, Serialize};

use crate::types::GenerationConfig;

/// Position in the model fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModelTier {
    Primary,
    Fallback1,
    Fallback2,
}

impl ModelTier {
    /// The tier to use after a rate-limited attempt. Saturates at the last tier.
    pub fn next(self) -> Self {
        match self {
            Self::Primary => Self::Fallback1,
            Self::Fallback1 | Self::Fallback2 => Self::Fallback2,
        }
    }

    /// Sampling parameters for this tier.
    pub fn generation_config(self) -> GenerationConfig {
        let (temperature, max_output_tokens) = match self {
            Self::Primary => (0.9, 2048),
            Self::Fallback1 => (0.9, 1024),
            Self::Fallback2 => (0.7, 2048),
        };
        GenerationConfig {
            temperature,
            top_p: 0.8,
            top_k: 40,
            max_output_tokens,
            stop_sequences: Vec::new(),
        }
    }
}

/// Model names bound to each tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSet {
    pub primary: String,
    pub fallback1: String,
    pub fallback2: String,
}

impl Default for ModelSet {
    fn default() -> Self {
        Self {
            primary: "gemini-1.5-pro".to_string(),
            fallback1: "gemini-1.5-flash".to_string(),
            fallback2: "gemini-pro".to_string(),
        }
    }
}

impl ModelSet {
    pub fn name(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Primary => &self.primary,
            ModelTier::Fallback1 => &self.fallback1,
            ModelTier::Fallback2 => &self.fallback2,
        }
    }
}
