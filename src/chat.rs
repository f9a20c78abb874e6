//! Conversation with the service's security assistant.
//!
//! The log is append-only: a user turn is recorded before the request goes
//! out and exactly one assistant turn follows once it settles, whether the
//! exchange worked or not.

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    error::{INVALID_RESPONSE_MESSAGE, TransportError},
    model::ChatTurn,
    service::{ChatRequest, RawResponse, ScanService},
};

pub const ERROR_MARKER: &str = "⚠️";
pub const CHAT_UNAVAILABLE_MESSAGE: &str = "Chat service unavailable";

pub fn mark_error(message: &str) -> String {
    format!("{ERROR_MARKER} {message}")
}

/// Text of the assistant turn for a settled chat exchange.
pub fn interpret_chat_response(outcome: Result<RawResponse, TransportError>) -> String {
    let response = match outcome {
        Ok(response) => response,
        Err(error) => return mark_error(&error.message),
    };

    let Ok(body) = serde_json::from_str::<Value>(&response.body) else {
        return mark_error(INVALID_RESPONSE_MESSAGE);
    };

    if !response.is_success() {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .unwrap_or(CHAT_UNAVAILABLE_MESSAGE);

        return mark_error(message);
    }

    body.get("reply")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub struct Conversation<S> {
    service: S,
    turns: Vec<ChatTurn>,
    draft: String,
    include_scan: bool,
}

impl<S: ScanService> Conversation<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            turns: Vec::new(),
            draft: String::new(),
            include_scan: false,
        }
    }

    /// Asks the service to add its latest scan to the assistant's context.
    pub fn with_scan_context(mut self, include_scan: bool) -> Self {
        self.include_scan = include_scan;
        self
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn last_turn(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Sends `text` as a user message. Blank messages are ignored.
    pub async fn send(&mut self, text: &str) {
        if text.trim().is_empty() {
            debug!("ignoring blank chat message");
            return;
        }

        self.turns.push(ChatTurn::user(text));

        let request = ChatRequest {
            message: text.to_string(),
            include_scan: self.include_scan,
        };

        debug!(include_scan = request.include_scan, "sending chat message");

        let outcome = self.service.chat(&request).await;

        if let Err(error) = &outcome {
            warn!(%error, "chat request failed");
        }

        self.turns.push(ChatTurn::assistant(interpret_chat_response(outcome)));
        self.draft.clear();
    }

    /// Sends whatever is currently in the draft.
    pub async fn send_draft(&mut self) {
        let text = self.draft.clone();
        self.send(&text).await;
    }
}
