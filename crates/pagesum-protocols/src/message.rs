//! Messages exchanged between the popup, content script and background contexts.
//!
//! Requests carry an `action` tag; responses are distinguished by shape, the
//! same way the extension wire format did.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::SummaryLength;

/// A request sent to another context.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    /// Ask the background context for the persona text.
    GetPersona,

    /// Liveness probe for an injected content script.
    Ping,

    /// Summarize the page the content script is attached to.
    #[serde(rename_all = "camelCase")]
    Summarize {
        summary_length: SummaryLength,
        api_key: String,
    },
}

impl Request {
    pub fn summarize(summary_length: SummaryLength, api_key: impl Into<String>) -> Self {
        Self::Summarize {
            summary_length,
            api_key: api_key.into(),
        }
    }

    /// The wire name of the action.
    pub fn action(&self) -> &'static str {
        match self {
            Self::GetPersona => "getPersona",
            Self::Ping => "ping",
            Self::Summarize { .. } => "summarize",
        }
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GetPersona => f.write_str("GetPersona"),
            Self::Ping => f.write_str("Ping"),
            Self::Summarize { summary_length, .. } => f
                .debug_struct("Summarize")
                .field("summary_length", summary_length)
                .field("api_key", &"<redacted>")
                .finish(),
        }
    }
}

/// A response delivered back to the sender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Persona {
        persona: String,
        loaded: bool,
        fallback: bool,
    },
    Pong {
        status: String,
        timestamp: i64,
    },
    Summary {
        summary: String,
    },
    Error {
        error: String,
    },
}

impl Response {
    /// Reply to a [`Request::Ping`], stamped with the current time in milliseconds.
    pub fn pong() -> Self {
        Self::Pong {
            status: "ok".to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn summary(summary: impl Into<String>) -> Self {
        Self::Summary {
            summary: summary.into(),
        }
    }

    pub fn error(error: impl fmt::Display) -> Self {
        Self::Error {
            error: error.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
