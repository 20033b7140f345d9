//! # TitleBar Component
//!
//! Top status line: backend address and the controller's status message.
//! Purely presentational; all data arrives as props.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::tui::component::Component;

pub struct TitleBar<'a> {
    pub backend_url: &'a str,
    pub status_message: &'a str,
}

impl<'a> TitleBar<'a> {
    pub fn text(&self) -> String {
        if self.status_message.is_empty() {
            format!("CorpGuide AI ({})", self.backend_url)
        } else {
            format!("CorpGuide AI ({}) | {}", self.backend_url, self.status_message)
        }
    }
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let span = Span::styled(self.text(), Style::default().fg(Color::Yellow));
        frame.render_widget(span, area);
    }
}
