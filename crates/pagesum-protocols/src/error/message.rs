//! Cross-context messaging errors.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageError {
    #[error("Message timeout")]
    Timeout(Duration),

    #[error("No response received")]
    NoResponse,

    #[error("Receiving end does not exist")]
    NoListener,

    #[error("Listener failed: {0}")]
    ListenerFailed(String),
}
