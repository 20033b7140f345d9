//! # Actions
//!
//! Everything that can happen in the chat becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Backend answers? That's `Action::ResponseReceived { .. }`.
//!
//! The `update()` function applies an action to the state and returns an
//! [`Effect`] describing any I/O the driver should perform. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Exchange lifecycle
//!
//! ```text
//!  Idle ──Submit(non-blank)──▶ Sending ──ResponseReceived──▶ Idle
//!   ▲                            │
//!   └───────────Reset────────────┘   (in-flight exchange is cancelled)
//! ```

use log::{debug, info, warn};

use crate::core::history::Turn;
use crate::core::state::{App, ExchangeId, Phase};
use crate::render::MessageClass;
use crate::transport::{ChatResponse, TransportError};

/// Shown in place of an answer when the exchange fails for any reason.
pub const APOLOGY_MESSAGE: &str =
    "Sorry, an error occurred connecting to the server. Please ensure the backend is running. 😔";

/// Sole content of the chat box after a reset.
pub const RESET_WELCOME_MESSAGE: &str =
    "Welcome back! 👋\nMemory cleared, you can start a new topic.";

#[derive(Debug)]
pub enum Action {
    Submit(String),
    ResponseReceived {
        exchange: ExchangeId,
        result: Result<ChatResponse, TransportError>,
    },
    Reset,
    Quit,
}

/// I/O requested by `update()`.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// Ask the backend; report back with `Action::ResponseReceived` for `exchange`.
    SendQuestion {
        exchange: ExchangeId,
        question: String,
        history: Vec<Turn>,
    },
    /// Cancel any in-flight send and notify the backend, fire-and-forget.
    ResetSession,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => submit(app, &text),
        Action::ResponseReceived { exchange, result } => {
            complete_exchange(app, exchange, result);
            Effect::None
        }
        Action::Reset => reset(app),
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App, text: &str) -> Effect {
    let question = text.trim();
    if question.is_empty() {
        debug!("Ignoring blank submission");
        return Effect::None;
    }
    if app.is_sending() || !app.input_enabled {
        debug!("Ignoring submission while an exchange is in flight");
        return Effect::None;
    }

    // Optimistic: the question shows before the network completes
    app.chat.render_message(question, MessageClass::User);
    app.input_enabled = false;
    let indicator = app.chat.render_loading_indicator();

    let exchange = app.next_exchange_id();
    app.phase = Phase::Sending {
        exchange,
        question: question.to_string(),
        indicator,
    };
    app.status_message = String::from("Waiting for answer...");
    info!("Exchange {} started", exchange.0);

    Effect::SendQuestion {
        exchange,
        question: question.to_string(),
        history: app.history.snapshot(),
    }
}

fn complete_exchange(
    app: &mut App,
    exchange: ExchangeId,
    result: Result<ChatResponse, TransportError>,
) {
    let current = matches!(app.phase, Phase::Sending { exchange: id, .. } if id == exchange);
    if !current {
        debug!("Dropping response for stale exchange {}", exchange.0);
        return;
    }
    let Phase::Sending {
        question,
        indicator,
        ..
    } = std::mem::replace(&mut app.phase, Phase::Idle)
    else {
        return;
    };

    app.chat.remove_loading_indicator(&indicator);
    match result {
        Ok(response) => {
            app.chat.render_message(&response.answer, MessageClass::Bot);
            app.history.append(Turn::human(question));
            app.history.append(Turn::ai(response.answer));
            app.status_message = String::from("Ready");
            info!("Exchange {} answered", exchange.0);
        }
        Err(e) => {
            warn!("Exchange {} failed: {}", exchange.0, e);
            app.chat.render_message(APOLOGY_MESSAGE, MessageClass::Bot);
            app.status_message = String::from("Backend unavailable");
        }
    }

    finish_exchange(app);
}

/// Runs after every completed or cancelled exchange, whatever the outcome.
fn finish_exchange(app: &mut App) {
    app.input_enabled = true;
    app.focus_requested = true;
}

fn reset(app: &mut App) -> Effect {
    if let Phase::Sending { exchange, .. } = app.phase {
        info!("Reset cancels in-flight exchange {}", exchange.0);
    }
    app.phase = Phase::Idle;
    app.history.clear();
    app.chat.reset_to_welcome(RESET_WELCOME_MESSAGE);
    app.status_message = String::from("New chat");
    finish_exchange(app);
    info!("Conversation reset");
    Effect::ResetSession
}
