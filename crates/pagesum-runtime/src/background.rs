//! Background context: answers persona requests.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use pagesum_protocols::message::{Request, Response};
use pagesum_protocols::port::{MessageListener, MessagePort};

use crate::persona::PersonaLoader;

/// Name of the background context's port.
pub const RUNTIME_PORT: &str = "runtime";

/// Listener serving `getPersona` from the [`PersonaLoader`].
#[derive(Debug)]
pub struct BackgroundScript {
    loader: Arc<PersonaLoader>,
}

impl BackgroundScript {
    pub fn new(loader: Arc<PersonaLoader>) -> Self {
        Self { loader }
    }

    /// Create the runtime port with this script listening on it.
    pub fn install(loader: Arc<PersonaLoader>) -> Arc<MessagePort> {
        let port = Arc::new(MessagePort::new(RUNTIME_PORT));
        port.add_listener(Arc::new(Self::new(loader)));
        port
    }
}

#[async_trait]
impl MessageListener for BackgroundScript {
    async fn on_message(&self, request: Request) -> Option<Response> {
        match request {
            Request::GetPersona => {
                debug!("Received request for persona");
                let persona = self.loader.get_persona().await;
                Some(Response::Persona {
                    persona: persona.text.to_string(),
                    loaded: true,
                    fallback: persona.fallback,
                })
            }
            _ => None,
        }
    }
}
