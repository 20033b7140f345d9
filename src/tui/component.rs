use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of the screen that draws itself into a `Rect`.
///
/// Props arrive as struct fields; `&mut self` lets stateful components
/// update scroll offsets or cursor positions during the draw pass.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that reacts to terminal events.
pub trait EventHandler {
    /// High-level event emitted to the parent.
    type Event;

    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
