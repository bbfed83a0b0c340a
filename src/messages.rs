//! Role-tagged input messages for completion requests.
//!
//! Messages carry no conversation state; a caller assembles the full sequence
//! for every call.

use serde::{Deserialize, Serialize};

/// Message roles accepted by the completion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single input message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    /// Create a new message.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Build a message from free-form text.
    ///
    /// Text that parses as a JSON object with `role` and `content` fields
    /// becomes that message; anything else becomes a plain user message.
    pub fn from_text(text: &str) -> Self {
        serde_json::from_str::<Message>(text).unwrap_or_else(|_| Message::user(text))
    }

    /// Convert a batch of free-form text items into messages.
    pub fn from_texts<I, S>(items: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        items
            .into_iter()
            .map(|item| Self::from_text(item.as_ref()))
            .collect()
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::from_text(text)
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::from_text(&text)
    }
}
