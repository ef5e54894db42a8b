//! # pagesum Runtime
//!
//! The three cooperating contexts: the background script serving the
//! persona, the content script injected into pages, and the popup trigger.
//! They only talk through [`MessagePort`](pagesum_protocols::MessagePort)s.

pub mod background;
pub mod content_script;
pub mod extension;
pub mod host;
pub mod persona;
pub mod popup;

#[cfg(test)]
mod test_support;

pub use background::{BackgroundScript, RUNTIME_PORT};
pub use content_script::{ContentScript, ContentScriptConfig};
pub use extension::{Extension, ExtensionError};
pub use host::{HeadlessBrowser, ScriptEnvironment, Tab};
pub use persona::{
    AssetPersonaSource, Persona, PersonaLoader, PersonaSource, StaticPersonaSource,
    FALLBACK_PERSONA,
};
pub use popup::{check_page_access, render, Popup, PopupConfig, PopupView, RESTRICTED_PREFIXES};
