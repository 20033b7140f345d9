//! HTTP implementation of [`ChatBackend`] for the CorpGuide API.
//!
//! - `POST {base_url}/chat` with `{question, chat_history}` → `{answer, sources}`
//! - `POST {base_url}/reset` with no body, response ignored

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::backend::{ChatBackend, TransportError};
use super::types::{ChatRequest, ChatResponse};
use crate::core::config::{DEFAULT_CHAT_PATH, DEFAULT_RESET_PATH, ResolvedConfig};
use crate::core::history::Turn;

pub struct HttpBackend {
    base_url: String,
    chat_path: String,
    reset_path: String,
    /// Applies to send and reset alike. `None` = wait indefinitely.
    timeout: Option<Duration>,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            chat_path: DEFAULT_CHAT_PATH.to_string(),
            reset_path: DEFAULT_RESET_PATH.to_string(),
            timeout: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.base_url.clone())
            .with_paths(&config.chat_path, &config.reset_path)
            .with_timeout(config.timeout)
    }

    pub fn with_paths(mut self, chat_path: &str, reset_path: &str) -> Self {
        self.chat_path = normalize_path(chat_path);
        self.reset_path = normalize_path(reset_path);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn bounded<T>(
        &self,
        fut: impl Future<Output = Result<T, TransportError>>,
    ) -> Result<T, TransportError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| TransportError::Timeout)?,
            None => fut.await,
        }
    }

    async fn post_question(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        let response = self
            .client
            .post(self.url(&self.chat_path))
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        debug!("Chat response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Chat backend error: {} - {}", status, message);
            return Err(TransportError::Api { status, message });
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| TransportError::Parse(e.to_string()))
    }

    async fn post_reset(&self) -> Result<(), TransportError> {
        let response = self
            .client
            .post(self.url(&self.reset_path))
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::Api { status, message });
        }
        Ok(())
    }
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn send_question(
        &self,
        question: &str,
        history: &[Turn],
    ) -> Result<ChatResponse, TransportError> {
        let request = ChatRequest {
            question: question.to_string(),
            chat_history: history.to_vec(),
        };

        info!(
            "Sending question: question_len={}, history_turns={}",
            request.question.len(),
            request.chat_history.len()
        );

        let response = self.bounded(self.post_question(&request)).await?;

        info!(
            "Answer received: answer_len={}, sources={:?}, latency={:?}",
            response.answer.len(),
            response.unique_sources(),
            response.latency
        );
        Ok(response)
    }

    async fn reset_session(&self) -> Result<(), TransportError> {
        self.bounded(self.post_reset()).await
    }
}
