//! # Conversation History
//!
//! Ordered `(role, text)` turns sent back to the backend as context on every
//! question. Lives only as long as the session; cleared on reset.
//!
//! On the wire each turn is a two-element array, e.g. `["human", "Hello"]`,
//! which is what serde produces for a tuple struct.

use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "human")]
    Human,
    #[serde(rename = "ai")]
    Ai,
}

/// One unit of conversation history. Immutable once created.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Turn(Role, String);

impl Turn {
    pub fn human(text: impl Into<String>) -> Self {
        Turn(Role::Human, text.into())
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Turn(Role::Ai, text.into())
    }

    pub fn role(&self) -> Role {
        self.0
    }

    pub fn text(&self) -> &str {
        &self.1
    }
}

/// Append-only turn store, optionally capped.
///
/// The cap trims whole exchanges: the stored turns never start with an
/// `ai` turn whose question was dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    turns: Vec<Turn>,
    /// Oldest turns are dropped once this many are held. Always even.
    /// `None` = unbounded.
    max_turns: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cap(max_turns: Option<usize>) -> Self {
        Self {
            turns: Vec::new(),
            // An odd cap would split a human/ai pair
            max_turns: max_turns.map(|n| n.next_multiple_of(2)),
        }
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
        if let Some(cap) = self.max_turns
            && self.turns.len() > cap
        {
            let excess = self.turns.len() - cap;
            self.turns.drain(..excess);
            let orphans = self
                .turns
                .iter()
                .take_while(|t| t.role() == Role::Ai)
                .count();
            self.turns.drain(..orphans);
        }
    }

    /// Owned copy of the current turns. Later appends or clears do not affect it.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
