//! # Renderer
//!
//! UI-agnostic display model for the conversation. The controller appends
//! to a [`ChatBox`]; front-ends only read it.

pub mod chat_box;
pub mod format;

pub use chat_box::{ChatBox, Element, LoadingHandle, MessageClass};
pub use format::{Inline, format_text};
