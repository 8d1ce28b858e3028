use serde::{Deserialize, Serialize};

/// Role of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single message in a conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered chat context for one conversation.
///
/// Serialized as a bare JSON array of `{role, content}` objects. Entries are
/// only ever appended; insertion order is the order sent upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// A new transcript holding only the system instruction.
    pub fn seeded(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(system_prompt)],
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True if `earlier` is a prefix of this transcript.
    pub fn extends(&self, earlier: &Transcript) -> bool {
        self.messages.starts_with(&earlier.messages)
    }
}

impl From<Vec<ChatMessage>> for Transcript {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }
}
