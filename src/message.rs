//! Chat message model
//!
//! Defines the message types exchanged during a chat session and the
//! append-only transcript that owns them. Messages are immutable once
//! appended; insertion order is the display order.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Name used when a tool descriptor carries no `name` field
pub const DEFAULT_TOOL_NAME: &str = "Unknown Tool";

/// Description used when a tool descriptor carries no `description` field
pub const DEFAULT_TOOL_DESCRIPTION: &str = "No description available";

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// A tool the assistant invoked while producing a reply
///
/// Derived from the backend payload, read-only, and attached to at most
/// one assistant message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUse {
    pub name: String,
    pub description: String,
    /// Structured payload; the raw tool descriptor when no `data` field
    /// was provided.
    pub data: Value,
}

impl ToolUse {
    /// Build a tool descriptor from a raw JSON element, applying field
    /// defaults for anything missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use parlay::message::ToolUse;
    /// use serde_json::json;
    ///
    /// let tool = ToolUse::from_value(&json!({"name": "search"}));
    /// assert_eq!(tool.name, "search");
    /// assert_eq!(tool.description, "No description available");
    /// assert_eq!(tool.data, json!({"name": "search"}));
    /// ```
    pub fn from_value(value: &Value) -> Self {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_TOOL_NAME)
            .to_string();
        let description = value
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_TOOL_DESCRIPTION)
            .to_string();
        let data = match value.get("data") {
            Some(Value::Null) | None => value.clone(),
            Some(data) => data.clone(),
        };

        Self {
            name,
            description,
            data,
        }
    }
}

/// One entry in the chat transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Local>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolUse>>,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Local::now(),
            tools: None,
        }
    }

    /// Create an assistant message without tool annotations
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Local::now(),
            tools: None,
        }
    }

    /// Create an assistant message with tool annotations
    pub fn assistant_with_tools(content: impl Into<String>, tools: Vec<ToolUse>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Local::now(),
            tools: Some(tools),
        }
    }
}

/// Append-only, ordered list of messages for one session
///
/// Insertion order is the chronological/display order and is never
/// reordered. Entries live for the duration of the in-memory session.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message; the only mutation the transcript supports.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
