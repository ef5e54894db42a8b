//! Browser host protocol: tabs, script injection and tab messaging.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{BrowserError, MessageError};
use crate::message::{Request, Response};

/// Tab identifier.
pub type TabId = u32;

/// What the popup can see about a tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: TabId,
    pub url: String,
}

/// Host that owns tabs and runs injected content scripts.
#[async_trait]
pub trait Browser: Send + Sync {
    /// The tab the user is looking at.
    async fn active_tab(&self) -> Result<TabInfo, BrowserError>;

    /// Inject the page extractor into a tab. Injecting twice is harmless.
    async fn inject_content_script(&self, tab_id: TabId) -> Result<(), BrowserError>;

    /// Send a message to the scripts running in a tab.
    async fn send_to_tab(
        &self,
        tab_id: TabId,
        request: Request,
        timeout: Duration,
    ) -> Result<Response, MessageError>;
}
