//! # Chat Box
//!
//! The display model: an ordered list of message and loading-indicator
//! elements. Front-ends draw it (see `tui::components::message_list`) or
//! serialize it with [`ChatBox::to_html`].
//!
//! ```text
//! ChatBox
//! ├── elements: Vec<Element>
//! │   ├── Message { class: User | Bot, content: Vec<Inline> }
//! │   └── Loading(LoadingHandle)
//! ├── next_handle: u64          // never reused
//! └── scroll_pending: bool      // consumed by the front-end
//! ```

use crate::render::format::{self, Inline};

/// Visual class of a message element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageClass {
    User,
    Bot,
}

impl MessageClass {
    pub fn css_class(self) -> &'static str {
        match self {
            MessageClass::User => "user-message",
            MessageClass::Bot => "bot-message",
        }
    }
}

/// Opaque token for a pending indicator. Only the chat box that issued it
/// can make use of it.
#[derive(Debug, PartialEq, Eq)]
pub struct LoadingHandle(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Message {
        class: MessageClass,
        content: Vec<Inline>,
    },
    /// Animated three-dot placeholder.
    Loading(u64),
}

#[derive(Debug, Default)]
pub struct ChatBox {
    elements: Vec<Element>,
    next_handle: u64,
    scroll_pending: bool,
}

impl ChatBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_message(&mut self, text: &str, class: MessageClass) {
        self.elements.push(Element::Message {
            class,
            content: format::format_text(text),
        });
        self.scroll_to_latest();
    }

    pub fn render_loading_indicator(&mut self) -> LoadingHandle {
        let id = self.next_handle;
        self.next_handle += 1;
        self.elements.push(Element::Loading(id));
        self.scroll_to_latest();
        LoadingHandle(id)
    }

    /// Removes the indicator if it is still present. Returns whether anything
    /// was removed; a second call for the same handle is a no-op.
    pub fn remove_loading_indicator(&mut self, handle: &LoadingHandle) -> bool {
        let before = self.elements.len();
        self.elements
            .retain(|e| !matches!(e, Element::Loading(id) if *id == handle.0));
        self.elements.len() != before
    }

    /// Replaces all content with a single bot message.
    pub fn reset_to_welcome(&mut self, text: &str) {
        self.elements.clear();
        self.render_message(text, MessageClass::Bot);
    }

    pub fn scroll_to_latest(&mut self) {
        self.scroll_pending = true;
    }

    /// Returns and clears the pending scroll request.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_pending)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn is_loading(&self) -> bool {
        self.elements
            .iter()
            .any(|e| matches!(e, Element::Loading(_)))
    }

    /// Serializes the chat box as HTML message elements.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for element in &self.elements {
            match element {
                Element::Message { class, content } => {
                    html.push_str(&format!(
                        "<div class=\"message {}\"><div class=\"msg-content\">{}</div></div>\n",
                        class.css_class(),
                        format::to_html(content)
                    ));
                }
                Element::Loading(id) => {
                    html.push_str(&format!(
                        "<div class=\"message bot-message\" id=\"loading-{id}\"><div class=\"msg-content\">\
                         <div class=\"typing-indicator\"><span></span><span></span><span></span></div>\
                         </div></div>\n"
                    ));
                }
            }
        }
        html
    }
}
