//! # Application State
//!
//! Core business state for the chat client. This module contains domain
//! logic only, no TUI-specific types. Presentation state lives in the `tui`
//! module.
//!
//! ```text
//! App
//! ├── history: History          // turns sent as context
//! ├── chat: ChatBox             // what the user sees
//! ├── phase: Phase              // Idle | Sending
//! ├── input_enabled: bool       // false while Sending
//! ├── focus_requested: bool     // consumed by the front-end
//! └── status_message: String    // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::history::History;
use crate::render::{ChatBox, LoadingHandle, MessageClass};

/// Identifies one send cycle. Responses carrying an old id are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeId(pub u64);

#[derive(Debug)]
pub enum Phase {
    Idle,
    Sending {
        exchange: ExchangeId,
        question: String,
        indicator: LoadingHandle,
    },
}

pub struct App {
    pub history: History,
    pub chat: ChatBox,
    pub phase: Phase,
    pub input_enabled: bool,
    pub focus_requested: bool,
    pub status_message: String,
    next_exchange: u64,
}

impl App {
    pub fn new(greeting: &str, max_turns: Option<usize>) -> Self {
        let mut chat = ChatBox::new();
        chat.render_message(greeting, MessageClass::Bot);
        Self {
            history: History::with_cap(max_turns),
            chat,
            phase: Phase::Idle,
            input_enabled: true,
            focus_requested: true,
            status_message: String::from("Ready"),
            next_exchange: 0,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(&config.greeting, config.max_turns)
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.phase, Phase::Sending { .. })
    }

    pub(crate) fn next_exchange_id(&mut self) -> ExchangeId {
        let id = ExchangeId(self.next_exchange);
        self.next_exchange += 1;
        id
    }

    /// Returns and clears a pending request to focus the input field.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }
}

#[cfg(test)]
mod tests {
    use crate::render::Element;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Ready");
        assert!(!app.is_sending());
        assert!(app.input_enabled);
        assert!(app.history.is_empty());
        assert!(matches!(app.chat.elements(), [Element::Message { .. }]));
    }

    #[test]
    fn test_exchange_ids_increase() {
        let mut app = test_app();
        let a = app.next_exchange_id();
        let b = app.next_exchange_id();
        assert!(b.0 > a.0);
    }
}
