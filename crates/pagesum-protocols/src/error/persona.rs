//! Persona loading errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersonaError {
    #[error("Failed to load persona: {0}")]
    LoadFailed(String),

    #[error("Persona file is empty")]
    Empty,

    #[error("Failed to get persona after {attempts} attempts: {message}")]
    Unavailable { attempts: u32, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
