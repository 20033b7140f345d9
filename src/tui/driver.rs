//! Runs the I/O that `core::action::update` asks for.
//!
//! Sends are spawned on the tokio runtime and report back over the action
//! channel. Resets are spawned and forgotten: their outcome is only logged.

use std::sync::{Arc, mpsc};

use log::{info, warn};
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect};
use crate::core::history::Turn;
use crate::core::state::ExchangeId;
use crate::transport::ChatBackend;

pub struct EffectDriver {
    backend: Arc<dyn ChatBackend>,
    tx: mpsc::Sender<Action>,
    /// The one send that may be in flight.
    in_flight: Option<AbortHandle>,
}

impl EffectDriver {
    pub fn new(backend: Arc<dyn ChatBackend>, tx: mpsc::Sender<Action>) -> Self {
        Self {
            backend,
            tx,
            in_flight: None,
        }
    }

    /// Performs `effect`. Returns true when the app should quit.
    pub fn run(&mut self, effect: Effect) -> bool {
        self.forget_finished_send();
        match effect {
            Effect::None => false,
            Effect::SendQuestion {
                exchange,
                question,
                history,
            } => {
                let handle = spawn_send(
                    self.backend.clone(),
                    exchange,
                    question,
                    history,
                    self.tx.clone(),
                );
                self.in_flight = Some(handle);
                false
            }
            Effect::ResetSession => {
                if let Some(handle) = self.in_flight.take() {
                    handle.abort();
                }
                spawn_reset(self.backend.clone());
                false
            }
            Effect::Quit => true,
        }
    }

    /// Drops the handle once its send has delivered a response.
    fn forget_finished_send(&mut self) {
        if self.in_flight.as_ref().is_some_and(AbortHandle::is_finished) {
            self.in_flight = None;
        }
    }
}

fn spawn_send(
    backend: Arc<dyn ChatBackend>,
    exchange: ExchangeId,
    question: String,
    history: Vec<Turn>,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!(
        "Spawning send for exchange {} ({} history turns)",
        exchange.0,
        history.len()
    );
    let task = tokio::spawn(async move {
        let result = backend.send_question(&question, &history).await;
        if tx
            .send(Action::ResponseReceived { exchange, result })
            .is_err()
        {
            warn!(
                "Failed to deliver response for exchange {}: receiver dropped",
                exchange.0
            );
        }
    });
    task.abort_handle()
}

fn spawn_reset(backend: Arc<dyn ChatBackend>) {
    tokio::spawn(async move {
        match backend.reset_session().await {
            Ok(()) => info!("Backend history reset"),
            Err(e) => warn!("Backend reset failed (might be stateless): {}", e),
        }
    });
}
