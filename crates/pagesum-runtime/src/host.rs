//! Headless browser host.
//!
//! Tabs hold a URL, a document and a message port. Injected content scripts
//! register on the tab's port; each tab is injected at most once.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, info};

use pagesum_protocols::browser::{Browser, TabId, TabInfo};
use pagesum_protocols::error::{BrowserError, MessageError};
use pagesum_protocols::message::{Request, Response};
use pagesum_protocols::port::MessagePort;
use pagesum_protocols::provider::SummaryBackend;
use pagesum_tools_web::PageFetcher;

use crate::content_script::{ContentScript, ContentScriptConfig};

/// An open tab.
pub struct Tab {
    id: TabId,
    url: String,
    document: Arc<str>,
    port: Arc<MessagePort>,
    content_script: OnceLock<Arc<ContentScript>>,
}

impl Tab {
    fn new(id: TabId, url: String, document: String) -> Self {
        let port = Arc::new(MessagePort::new(format!("tab-{}", id)));
        Self {
            id,
            url,
            document: Arc::from(document),
            port,
            content_script: OnceLock::new(),
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn port(&self) -> &Arc<MessagePort> {
        &self.port
    }

    pub fn is_injected(&self) -> bool {
        self.content_script.get().is_some()
    }

    pub fn info(&self) -> TabInfo {
        TabInfo {
            id: self.id,
            url: self.url.clone(),
        }
    }

    /// Install the content script once. Returns `false` if it was already there.
    fn inject(&self, env: &ScriptEnvironment) -> bool {
        let mut installed = false;
        self.content_script.get_or_init(|| {
            let script = Arc::new(ContentScript::new(
                Arc::clone(&self.document),
                Arc::clone(&env.runtime),
                Arc::clone(&env.backend),
                env.config.clone(),
            ));
            self.port.add_listener(script.clone());
            installed = true;
            script
        });
        installed
    }
}

impl std::fmt::Debug for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tab")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("injected", &self.is_injected())
            .finish()
    }
}

/// What an injected content script is wired to.
#[derive(Clone)]
pub struct ScriptEnvironment {
    /// The background context's port.
    pub runtime: Arc<MessagePort>,
    pub backend: Arc<dyn SummaryBackend>,
    pub config: ContentScriptConfig,
}

/// In-process browser without a window.
pub struct HeadlessBrowser {
    tabs: Mutex<HashMap<TabId, Arc<Tab>>>,
    active: Mutex<Option<TabId>>,
    next_id: AtomicU32,
    fetcher: PageFetcher,
    scripts: ScriptEnvironment,
}

impl HeadlessBrowser {
    pub fn new(fetcher: PageFetcher, scripts: ScriptEnvironment) -> Self {
        Self {
            tabs: Mutex::new(HashMap::new()),
            active: Mutex::new(None),
            next_id: AtomicU32::new(1),
            fetcher,
            scripts,
        }
    }

    /// Open a tab on `url` and make it active. http(s) pages are fetched;
    /// anything else opens blank.
    pub async fn open(&self, url: &str) -> Result<TabInfo, BrowserError> {
        if !is_web_url(url) {
            debug!("Opening {} without loading", url);
            return Ok(self.open_document(url, String::new()));
        }

        let page = self
            .fetcher
            .fetch(url)
            .await
            .map_err(|e| BrowserError::LoadFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        info!("Loaded {} ({} bytes, status {})", page.url, page.html.len(), page.status);
        Ok(self.open_document(&page.url, page.html))
    }

    /// Open a tab with a given document and make it active.
    pub fn open_document(&self, url: &str, html: impl Into<String>) -> TabInfo {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let tab = Arc::new(Tab::new(id, url.to_string(), html.into()));
        let info = tab.info();
        self.tabs.lock().insert(id, tab);
        *self.active.lock() = Some(id);
        debug!("Opened tab {} at {}", id, url);
        info
    }

    pub fn tab(&self, id: TabId) -> Option<Arc<Tab>> {
        self.tabs.lock().get(&id).cloned()
    }

    pub fn close(&self, id: TabId) -> bool {
        let removed = self.tabs.lock().remove(&id).is_some();
        let mut active = self.active.lock();
        if *active == Some(id) {
            *active = None;
        }
        removed
    }
}

impl std::fmt::Debug for HeadlessBrowser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessBrowser")
            .field("tabs", &self.tabs.lock().len())
            .field("active", &*self.active.lock())
            .finish()
    }
}

#[async_trait]
impl Browser for HeadlessBrowser {
    async fn active_tab(&self) -> Result<TabInfo, BrowserError> {
        let id = (*self.active.lock()).ok_or(BrowserError::NoActiveTab)?;
        self.tab(id)
            .map(|tab| tab.info())
            .ok_or(BrowserError::NoActiveTab)
    }

    async fn inject_content_script(&self, tab_id: TabId) -> Result<(), BrowserError> {
        let tab = self.tab(tab_id).ok_or(BrowserError::TabNotFound(tab_id))?;
        if !is_web_url(tab.url()) {
            return Err(BrowserError::InjectionFailed(format!(
                "Cannot access contents of url \"{}\"",
                tab.url()
            )));
        }

        if tab.inject(&self.scripts) {
            info!("Content script injected into tab {}", tab_id);
        } else {
            debug!("Content script already loaded in tab {}, skipping", tab_id);
        }
        Ok(())
    }

    async fn send_to_tab(
        &self,
        tab_id: TabId,
        request: Request,
        timeout: Duration,
    ) -> Result<Response, MessageError> {
        let port = self
            .tab(tab_id)
            .map(|tab| Arc::clone(tab.port()))
            .ok_or(MessageError::NoListener)?;
        port.send(request, timeout).await
    }
}

fn is_web_url(url: &str) -> bool {
    url::Url::parse(url)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
