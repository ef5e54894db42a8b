//! # pagesum Config
//!
//! Configuration file handling and user settings storage.

mod error;
mod loader;
mod schema;
mod settings;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use settings::{save_settings, FileSettingsStore, MemorySettingsStore, INVALID_API_KEY_MESSAGE};
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
