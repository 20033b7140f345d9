//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::history::Turn;
use crate::core::state::App;
use crate::render::{Element, Inline, MessageClass};
use crate::transport::{ChatBackend, ChatResponse, TransportError};

/// Backend that replays queued results and records what it was sent.
#[derive(Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<ChatResponse, TransportError>>>,
    pub questions: Mutex<Vec<(String, Vec<Turn>)>>,
    pub resets: Mutex<usize>,
}

impl ScriptedBackend {
    pub fn replying(replies: Vec<Result<ChatResponse, TransportError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn send_question(
        &self,
        question: &str,
        history: &[Turn],
    ) -> Result<ChatResponse, TransportError> {
        self.questions
            .lock()
            .unwrap()
            .push((question.to_string(), history.to_vec()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted reply".into())))
    }

    async fn reset_session(&self) -> Result<(), TransportError> {
        *self.resets.lock().unwrap() += 1;
        Err(TransportError::Network("reset endpoint unreachable".into()))
    }
}

/// Creates a test App with a fixed greeting and no history cap.
pub fn test_app() -> App {
    App::new("Hello!", None)
}

/// Raw text of every bot message, markers restored.
pub fn bot_texts(app: &App) -> Vec<String> {
    app.chat
        .elements()
        .iter()
        .filter_map(|e| match e {
            Element::Message {
                class: MessageClass::Bot,
                content,
            } => Some(plain_text(content)),
            _ => None,
        })
        .collect()
}

fn plain_text(nodes: &[Inline]) -> String {
    nodes
        .iter()
        .map(|node| match node {
            Inline::Text(text) => text.clone(),
            Inline::LineBreak => "\n".to_string(),
            Inline::Strong(children) => format!("**{}**", plain_text(children)),
        })
        .collect()
}
