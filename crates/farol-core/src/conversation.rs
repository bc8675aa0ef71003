//! Conversation model for the chat assistant
//!
//! A conversation is the append-only message history of one chat session.
//! It lives for the lifetime of the session and is discarded with it;
//! persistence, if any, belongs to an external collaborator.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Unique identifier for a message
pub type MessageId = Uuid;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat message
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    /// Unique identifier
    pub id: MessageId,

    /// Author of the message
    pub role: Role,

    /// Message text as shown to the user
    pub content: String,

    /// Submission timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a user message stamped with the current time
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message stamped with the current time
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Append-only ordered message history for one chat session.
///
/// Messages are never edited or removed; ordering is submission order,
/// serialized by the responder's processing gate.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return a reference to it
    pub fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        self.messages.last().unwrap()
    }

    /// All messages in submission order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Most recent message, if any
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
