//! # pagesum Provider - Gemini
//!
//! Summarization backend calling the Gemini `generateContent` endpoint, with
//! model-tier fallback when the API rate limits.

mod client;
mod prompt;
mod summarizer;
mod tier;
mod types;

pub use client::{GeminiClient, DEFAULT_BASE_URL};
pub use prompt::{build_prompt, MAX_PROMPT_CONTENT_CHARS};
pub use summarizer::{Backoff, GeminiSummarizer, SummarizerConfig};
pub use tier::{ModelSet, ModelTier};
pub use types::*;
