//! # pagesum Protocols
//!
//! Shared definitions for the pagesum workspace: message and page types,
//! the traits each context is built against, and the [`MessagePort`] every
//! context uses to exchange requests.
//!
//! ## Core Traits
//!
//! - [`MessageListener`] - handler registered on a context's [`MessagePort`]
//! - [`Browser`] - host owning tabs and injected scripts
//! - [`SettingsStore`] - user settings storage
//! - [`SummaryBackend`] - summarization service

pub mod browser;
pub mod error;
pub mod message;
pub mod port;
pub mod provider;
pub mod settings;
pub mod types;

pub use browser::{Browser, TabId, TabInfo};
pub use error::{
    BrowserError, MessageError, PersonaError, SettingsError, SummarizeError, TriggerError,
};
pub use message::{Request, Response};
pub use port::{MessageListener, MessagePort};
pub use provider::SummaryBackend;
pub use settings::{Settings, SettingsStore};
pub use types::*;
