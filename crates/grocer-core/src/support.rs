//! Scripted support assistant.
//!
//! There is no model behind this: every message gets the same holding reply.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opening messages of every chat.
pub const GREETING: [&str; 2] = [
    "Hello! I'm Orbit AI. How can I assist you with your order today?",
    "I can help with tracking, refunds, or product recommendations.",
];

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}

/// Chat transcript with the scripted assistant.
#[derive(Debug, Clone)]
pub struct SupportChat {
    messages: Vec<ChatMessage>,
}

impl SupportChat {
    pub fn new() -> Self {
        Self {
            messages: GREETING
                .iter()
                .map(|text| ChatMessage::new(Sender::Assistant, *text))
                .collect(),
        }
    }

    /// Post a user message and return the assistant's reply. Blank input
    /// is ignored and returns `None`.
    pub fn send(&mut self, text: &str) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.messages.push(ChatMessage::new(Sender::User, text));
        self.messages
            .push(ChatMessage::new(Sender::Assistant, scripted_reply(text)));
        self.messages.last()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

impl Default for SupportChat {
    fn default() -> Self {
        Self::new()
    }
}

fn scripted_reply(query: &str) -> String {
    format!(
        "I'm analyzing your request about '{}'. One moment please...",
        query
    )
}
