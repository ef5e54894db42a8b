//! Persona loading for the background context.
//!
//! The persona is read once. Callers that arrive while the read is in
//! flight queue a one-shot sender and are all answered with the same value
//! when it completes. A failed or empty read installs [`FALLBACK_PERSONA`]
//! and is never retried.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use pagesum_protocols::error::PersonaError;

/// Used when the persona asset cannot be read or is empty.
pub const FALLBACK_PERSONA: &str =
    "You are a helpful AI assistant that provides concise and accurate summaries.";

/// Persona compiled into the binary, served when no override path is configured.
pub const BUNDLED_PERSONA: &str = include_str!("../../../assets/persona.txt");

/// Persona text and whether it is the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub text: Arc<str>,
    pub fallback: bool,
}

impl Persona {
    pub fn loaded(text: impl Into<Arc<str>>) -> Self {
        Self {
            text: text.into(),
            fallback: false,
        }
    }

    pub fn fallback() -> Self {
        Self {
            text: Arc::from(FALLBACK_PERSONA),
            fallback: true,
        }
    }
}

/// Where the persona text comes from.
#[async_trait]
pub trait PersonaSource: Send + Sync {
    async fn fetch(&self) -> Result<String, PersonaError>;
}

/// Reads the persona from a text file on disk.
#[derive(Debug, Clone)]
pub struct AssetPersonaSource {
    path: PathBuf,
}

impl AssetPersonaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PersonaSource for AssetPersonaSource {
    async fn fetch(&self) -> Result<String, PersonaError> {
        debug!("Persona path: {}", self.path.display());
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| PersonaError::LoadFailed(format!("{}: {}", self.path.display(), e)))
    }
}

/// Serves a fixed string.
#[derive(Debug, Clone)]
pub struct StaticPersonaSource {
    text: String,
}

impl StaticPersonaSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl PersonaSource for StaticPersonaSource {
    async fn fetch(&self) -> Result<String, PersonaError> {
        Ok(self.text.clone())
    }
}

enum LoadState {
    Idle,
    Loading(Vec<oneshot::Sender<Persona>>),
    Loaded(Persona),
}

/// Load-once persona cache.
pub struct PersonaLoader {
    source: Arc<dyn PersonaSource>,
    state: Mutex<LoadState>,
}

impl PersonaLoader {
    pub fn new(source: Arc<dyn PersonaSource>) -> Self {
        Self {
            source,
            state: Mutex::new(LoadState::Idle),
        }
    }

    /// Begin loading in the background.
    pub fn start(self: &Arc<Self>) -> JoinHandle<Persona> {
        let loader = Arc::clone(self);
        tokio::spawn(async move { loader.get_persona().await })
    }

    pub fn is_loaded(&self) -> bool {
        matches!(*self.state.lock(), LoadState::Loaded(_))
    }

    /// The cached persona, loading it first if needed.
    pub async fn get_persona(&self) -> Persona {
        loop {
            let waiter = {
                let mut state = self.state.lock();
                match &mut *state {
                    LoadState::Loaded(persona) => return persona.clone(),
                    LoadState::Loading(waiters) => {
                        let (tx, rx) = oneshot::channel();
                        waiters.push(tx);
                        Some(rx)
                    }
                    LoadState::Idle => {
                        *state = LoadState::Loading(Vec::new());
                        None
                    }
                }
            };

            match waiter {
                None => return self.load().await,
                Some(rx) => match rx.await {
                    Ok(persona) => return persona,
                    // The loading caller went away; take over the load.
                    Err(_) => continue,
                },
            }
        }
    }

    async fn load(&self) -> Persona {
        let mut guard = LoadGuard {
            state: &self.state,
            finished: false,
        };

        info!("Loading persona file");
        let persona = match self.source.fetch().await {
            Ok(text) if text.trim().is_empty() => {
                error!("Error loading persona file: {}", PersonaError::Empty);
                Persona::fallback()
            }
            Ok(text) => {
                info!("Persona loaded successfully ({} chars)", text.chars().count());
                Persona::loaded(text)
            }
            Err(e) => {
                error!("Error loading persona file: {}", e);
                Persona::fallback()
            }
        };

        let waiters = {
            let mut state = self.state.lock();
            match std::mem::replace(&mut *state, LoadState::Loaded(persona.clone())) {
                LoadState::Loading(waiters) => waiters,
                _ => Vec::new(),
            }
        };
        guard.finished = true;

        debug!("Notifying {} persona waiters", waiters.len());
        for waiter in waiters {
            let _ = waiter.send(persona.clone());
        }
        persona
    }
}

impl std::fmt::Debug for PersonaLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersonaLoader")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// Resets an abandoned load so a waiter can retry it.
struct LoadGuard<'a> {
    state: &'a Mutex<LoadState>,
    finished: bool,
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            let mut state = self.state.lock();
            if matches!(*state, LoadState::Loading(_)) {
                *state = LoadState::Idle;
            }
        }
    }
}

#[cfg(test)]
#[path = "persona_tests.rs"]
mod tests;
