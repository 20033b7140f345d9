//! # InputBox Component
//!
//! Single-line question field.
//!
//! The buffer and cursor are internal state. `enabled` and `focused` are
//! props from the parent: the field is disabled while an answer is pending
//! and unfocused after Esc.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const HEIGHT: u16 = 3;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed; carries the raw buffer. The parent clears it on acceptance.
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    pub buffer: String,
    /// Byte offset into `buffer`, always on a char boundary.
    cursor: usize,
    pub enabled: bool,
    pub focused: bool,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            enabled: true,
            focused: true,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }

    /// Text visible in a field `width` columns wide, scrolled so the cursor
    /// stays in view, and the cursor's column within it.
    fn visible(&self, width: usize) -> (String, u16) {
        let before: Vec<char> = self.buffer[..self.cursor].chars().collect();
        let mut skip = 0;
        let mut cursor_col: usize = before.iter().filter_map(|c| c.width()).sum();
        while cursor_col >= width.max(1) && skip < before.len() {
            cursor_col -= before[skip].width().unwrap_or(0);
            skip += 1;
        }

        let mut shown = String::new();
        let mut used = 0;
        for c in self.buffer.chars().skip(skip) {
            let w = c.width().unwrap_or(0);
            if used + w > width {
                break;
            }
            shown.push(c);
            used += w;
        }
        (shown, cursor_col as u16)
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (title, style) = if !self.enabled {
            (
                "Waiting for answer...",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM),
            )
        } else if !self.focused {
            (
                "Ask a question (Esc to scroll, type to return)",
                Style::default().fg(Color::Green).add_modifier(Modifier::DIM),
            )
        } else {
            (
                "Ask a question (Enter to send, Ctrl+N new chat)",
                Style::default().fg(Color::Green),
            )
        };

        let inner_width = area.width.saturating_sub(2) as usize;
        let (text, cursor_col) = self.visible(inner_width);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title);
        frame.render_widget(Paragraph::new(text).block(block).style(style), area);

        if self.focused && self.enabled {
            frame.set_cursor_position((area.x + 1 + cursor_col, area.y + 1));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut tmp));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single-line field: pasted newlines become spaces
                let flat = text.replace(['\r', '\n'], " ");
                self.insert_str(&flat);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace if self.cursor > 0 => {
                let prev = self.prev_boundary();
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete if self.cursor < self.buffer.len() => {
                let next = self.next_boundary();
                self.buffer.drain(self.cursor..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.prev_boundary();
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = self.next_boundary();
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => Some(InputEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}
