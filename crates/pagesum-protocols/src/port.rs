//! Message ports connecting isolated contexts.
//!
//! A port is the receiving side of a context: listeners register on it, and
//! senders race the listeners' reply against a timeout. Listeners run on
//! their own task, so a timed-out request still runs to completion.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::MessageError;
use crate::message::{Request, Response};

/// A handler registered on a [`MessagePort`].
///
/// Returning `None` means the listener does not handle the request; the
/// next listener is asked.
#[async_trait]
pub trait MessageListener: Send + Sync {
    async fn on_message(&self, request: Request) -> Option<Response>;
}

/// The message endpoint of one context.
pub struct MessagePort {
    name: String,
    listeners: RwLock<Vec<Arc<dyn MessageListener>>>,
}

impl MessagePort {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            listeners: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_listener(&self, listener: Arc<dyn MessageListener>) {
        self.listeners.write().push(listener);
        debug!("Listener registered on port '{}'", self.name);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Deliver `request` and wait at most `timeout` for the first reply.
    pub async fn send(&self, request: Request, timeout: Duration) -> Result<Response, MessageError> {
        let listeners = self.listeners.read().clone();
        if listeners.is_empty() {
            return Err(MessageError::NoListener);
        }

        debug!("Sending '{}' to port '{}'", request.action(), self.name);

        let handle = tokio::spawn(async move {
            for listener in listeners {
                if let Some(response) = listener.on_message(request.clone()).await {
                    return Some(response);
                }
            }
            None
        });

        match tokio::time::timeout(timeout, handle).await {
            Ok(Ok(Some(response))) => Ok(response),
            Ok(Ok(None)) => Err(MessageError::NoResponse),
            Ok(Err(e)) => Err(MessageError::ListenerFailed(e.to_string())),
            Err(_) => {
                warn!("Port '{}' did not answer within {:?}", self.name, timeout);
                Err(MessageError::Timeout(timeout))
            }
        }
    }
}

impl std::fmt::Debug for MessagePort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessagePort")
            .field("name", &self.name)
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
#[path = "port_tests.rs"]
mod tests;
