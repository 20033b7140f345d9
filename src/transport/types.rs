use serde::{Deserialize, Serialize};

use crate::core::history::Turn;

/// Body of `POST /chat`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub question: String,
    #[serde(default)]
    pub chat_history: Vec<Turn>,
}

/// Success body of `POST /chat`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub answer: String,
    pub sources: Vec<String>,
    /// Server-side processing time in seconds, when the backend reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency: Option<f64>,
}

impl ChatResponse {
    /// Source file names with duplicates removed, first occurrence wins.
    /// Citations are not displayed; this only feeds logging.
    pub fn unique_sources(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for source in &self.sources {
            if !seen.contains(&source.as_str()) {
                seen.push(source.as_str());
            }
        }
        seen
    }
}
