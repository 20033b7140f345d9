use std::fmt;

use async_trait::async_trait;

use super::types::ChatResponse;
use crate::core::history::Turn;

/// Errors from talking to the chat backend.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Connection refused, DNS failure, reset mid-body.
    Network(String),
    /// The configured request timeout elapsed.
    Timeout,
    /// Backend answered with a non-2xx status.
    Api { status: u16, message: String },
    /// Body was not the expected JSON.
    Parse(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Network(msg) => write!(f, "network error: {msg}"),
            TransportError::Timeout => write!(f, "request timed out"),
            TransportError::Api { status, message } => {
                write!(f, "backend error (HTTP {status}): {message}")
            }
            TransportError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// The two operations the chat backend exposes.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Asks a question with the conversation so far as context.
    async fn send_question(
        &self,
        question: &str,
        history: &[Turn],
    ) -> Result<ChatResponse, TransportError>;

    /// Asks the backend to drop any server-side conversation state.
    /// Callers treat failure as non-fatal.
    async fn reset_session(&self) -> Result<(), TransportError>;
}
