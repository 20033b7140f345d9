use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, TitleBar, input_box};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(input_box::HEIGHT)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    TitleBar {
        backend_url: &tui.backend_url,
        status_message: &app.status_message,
    }
    .render(frame, title_area);

    MessageList::new(&mut tui.message_list, app.chat.elements(), spinner_frame)
        .render(frame, main_area);

    tui.input_box.enabled = app.input_enabled;
    tui.input_box.render(frame, input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_draw_ui_shows_greeting_and_status() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let app = test_app();
        let mut tui = TuiState::new("http://localhost:8000");
        terminal
            .draw(|f| draw_ui(f, &app, &mut tui, 0))
            .unwrap();

        let text = screen(&terminal);
        assert!(text.contains("Hello!"));
        assert!(text.contains("Ready"));
        assert!(text.contains("Ask a question"));
    }

    #[test]
    fn test_draw_ui_disables_input_while_sending() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = test_app();
        update(&mut app, Action::Submit("Hello there".into()));
        let mut tui = TuiState::new("http://localhost:8000");
        terminal
            .draw(|f| draw_ui(f, &app, &mut tui, 0))
            .unwrap();

        let text = screen(&terminal);
        assert!(text.contains("Hello there"));
        assert!(text.contains("Waiting for answer..."));
        assert!(text.contains("●○○"));
        assert!(!tui.input_box.enabled);
    }
}
