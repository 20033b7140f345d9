use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::render::{Inline, MessageClass};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
pub const VERTICAL_OVERHEAD: u16 = 2;

/// Frames of the three-dot typing animation.
const TYPING_FRAMES: [&str; 4] = ["●○○", "○●○", "○○●", "○●○"];

/// A chat bubble for one message element.
///
/// Created fresh each frame from a `ChatBox` element. Emphasis nodes become
/// bold spans and line breaks start new lines; nothing else is interpreted.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub class: MessageClass,
    pub content: &'a [Inline],
}

impl<'a> Message<'a> {
    pub fn new(class: MessageClass, content: &'a [Inline]) -> Self {
        Self { class, content }
    }

    /// Predicts rendered height without rendering, using `textwrap` options
    /// that match `Paragraph`'s word wrapping.
    pub fn calculate_height(content: &[Inline], width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding
            return 1;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines: usize = plain_lines(content)
            .iter()
            .map(|line| textwrap::wrap(line, &options).len().max(1))
            .sum();
        u16::try_from(lines)
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }
}

/// Plain text per visual line, used for height prediction.
fn plain_lines(content: &[Inline]) -> Vec<String> {
    let mut lines = vec![String::new()];
    collect_plain(content, &mut lines);
    lines
}

fn collect_plain(nodes: &[Inline], lines: &mut Vec<String>) {
    for node in nodes {
        match node {
            Inline::Text(text) => {
                if let Some(line) = lines.last_mut() {
                    line.push_str(text);
                }
            }
            Inline::LineBreak => lines.push(String::new()),
            Inline::Strong(children) => collect_plain(children, lines),
        }
    }
}

/// Converts inline nodes into styled ratatui lines.
pub fn to_lines(content: &[Inline], base: Style) -> Vec<Line<'static>> {
    let mut lines: Vec<Vec<Span<'static>>> = vec![Vec::new()];
    collect_spans(content, base, &mut lines);
    lines.into_iter().map(Line::from).collect()
}

fn collect_spans(nodes: &[Inline], style: Style, lines: &mut Vec<Vec<Span<'static>>>) {
    for node in nodes {
        match node {
            Inline::Text(text) => {
                if let Some(line) = lines.last_mut() {
                    line.push(Span::styled(text.clone(), style));
                }
            }
            Inline::LineBreak => lines.push(Vec::new()),
            Inline::Strong(children) => {
                collect_spans(children, style.add_modifier(Modifier::BOLD), lines)
            }
        }
    }
}

fn class_style(class: MessageClass) -> Style {
    match class {
        MessageClass::User => Style::default().fg(Color::Green),
        MessageClass::Bot => Style::default().fg(Color::Blue),
    }
}

fn class_title(class: MessageClass) -> &'static str {
    match class {
        MessageClass::User => "you",
        MessageClass::Bot => "corpguide",
    }
}

fn bubble(title: &str, style: Style) -> Block<'_> {
    Block::bordered()
        .title(title)
        .border_type(BorderType::Rounded)
        .border_style(style.add_modifier(Modifier::DIM))
        .title_style(style)
        .padding(Padding::horizontal(CONTENT_PAD_H))
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = class_style(self.class);
        let block = bubble(class_title(self.class), style);
        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(to_lines(self.content, style))
            .wrap(Wrap { trim: false })
            .render(inner_area, buf);
    }
}

/// Placeholder bubble shown while an answer is pending.
pub struct TypingIndicator {
    pub frame: usize,
}

impl TypingIndicator {
    pub const HEIGHT: u16 = 1 + VERTICAL_OVERHEAD;

    pub fn dots(frame: usize) -> &'static str {
        TYPING_FRAMES[frame % TYPING_FRAMES.len()]
    }
}

impl Widget for TypingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = class_style(MessageClass::Bot);
        let block = bubble(class_title(MessageClass::Bot), style);
        let inner_area = block.inner(area);
        block.render(area, buf);
        Paragraph::new(Self::dots(self.frame))
            .style(style)
            .render(inner_area, buf);
    }
}
