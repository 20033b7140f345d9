//! # MessageList Component
//!
//! Scrollable view of the chat box.
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the `ChatBox` elements
//! (props). Heights are predicted per element so the scroll canvas can be
//! sized before anything is drawn.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::render::Element;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::{Message, TypingIndicator};
use crate::tui::event::TuiEvent;

/// Scroll state for the message list. Persisted in the parent `TuiState`.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    /// When true, the view follows the newest element.
    pub stick_to_bottom: bool,
    /// Element heights from the last frame.
    pub heights: Vec<u16>,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            heights: Vec::new(),
            viewport_height: 0,
        }
    }

    /// Canvas height. Saturates at `u16::MAX`; later elements are clipped.
    fn total_height(&self) -> u16 {
        self.heights.iter().fold(0u16, |acc, &h| acc.saturating_add(h))
    }

    fn max_offset(&self) -> u16 {
        self.total_height().saturating_sub(self.viewport_height)
    }

    /// Re-engage auto-scroll once the user has scrolled back to the bottom.
    fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => return None,
        }
        Some(())
    }
}

pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub elements: &'a [Element],
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        elements: &'a [Element],
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            elements,
            spinner_frame,
        }
    }

    pub fn element_height(element: &Element, width: u16) -> u16 {
        match element {
            Element::Message { content, .. } => Message::calculate_height(content, width),
            Element::Loading(_) => TypingIndicator::HEIGHT,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        self.state.heights = self
            .elements
            .iter()
            .map(|e| Self::element_height(e, content_width))
            .collect();
        self.state.viewport_height = area.height;
        let total_height = self.state.total_height();
        let canvas = Rect::new(0, 0, content_width, total_height);

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (element, &height) in self.elements.iter().zip(&self.state.heights) {
            let rect = Rect::new(0, y_offset, content_width, height).intersection(canvas);
            if rect.is_empty() {
                break;
            }
            match element {
                Element::Message { class, content } => {
                    scroll_view.render_widget(Message::new(*class, content), rect);
                }
                Element::Loading(_) => {
                    scroll_view.render_widget(
                        TypingIndicator {
                            frame: self.spinner_frame,
                        },
                        rect,
                    );
                }
            }
            y_offset = y_offset.saturating_add(height);
        }

        if self.state.stick_to_bottom {
            let max_y = self.state.max_offset();
            self.state.scroll_state.set_offset(Position { x: 0, y: max_y });
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
