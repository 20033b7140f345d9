//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, draws the chat box,
//! and translates keyboard events into `core::Action` values. Effects
//! returned by `update()` are handed to the [`driver::EffectDriver`].
//!
//! ## Redraw Strategy
//!
//! - **Animating** (typing indicator visible): draws every ~80ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! ## Keys
//!
//! Enter sends, Ctrl+N starts a new chat, Ctrl+C quits. Esc moves focus off
//! the input so Up/Down/PageUp/PageDown scroll; typing returns focus.

mod component;
mod components;
mod driver;
mod event;
mod ui;

use log::{info, warn};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::transport::ChatBackend;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::driver::EffectDriver;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub backend_url: String,
}

impl TuiState {
    pub fn new(backend_url: &str) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            backend_url: backend_url.to_string(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is ignored by terminals that lack it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Runs the chat UI until the user quits. Must be called inside a tokio
/// runtime; requests are spawned onto it.
pub fn run(
    config: ResolvedConfig,
    backend: Arc<dyn ChatBackend>,
    transcript: Option<PathBuf>,
) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(&config.base_url);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut driver = EffectDriver::new(backend, tx);

    let start_time = Instant::now();
    let mut needs_redraw = true;

    'main: loop {
        if app.take_focus_request() {
            tui.input_box.focused = true;
            needs_redraw = true;
        }
        if app.chat.take_scroll_request() {
            tui.message_list.stick_to_bottom = true;
            needs_redraw = true;
        }

        let animating = app.chat.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 6.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let effect = match event {
                TuiEvent::Resize => continue,
                TuiEvent::ForceQuit => update(&mut app, Action::Quit),
                TuiEvent::NewChat => update(&mut app, Action::Reset),
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown => {
                    tui.message_list.handle_event(&event);
                    continue;
                }
                TuiEvent::Escape => {
                    tui.input_box.focused = false;
                    continue;
                }
                _ if !tui.input_box.focused => {
                    tui.input_box.focused = true;
                    if matches!(event, TuiEvent::InputChar(_) | TuiEvent::Paste(_)) {
                        tui.input_box.handle_event(&event);
                    }
                    continue;
                }
                _ => match tui.input_box.handle_event(&event) {
                    Some(InputEvent::Submit(text)) => {
                        let effect = update(&mut app, Action::Submit(text));
                        if matches!(effect, Effect::SendQuestion { .. }) {
                            tui.input_box.clear();
                        }
                        effect
                    }
                    _ => continue,
                },
            };
            if driver.run(effect) {
                break 'main;
            }
        }

        // Results from background requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            let effect = update(&mut app, action);
            if driver.run(effect) {
                break 'main;
            }
        }
    }

    ratatui::restore();

    if let Some(path) = transcript {
        match std::fs::write(&path, app.chat.to_html()) {
            Ok(()) => info!("Transcript written to {}", path.display()),
            Err(e) => warn!("Failed to write transcript {}: {}", path.display(), e),
        }
    }
    Ok(())
}
