//! Conversation proxy: one persisted transcript per conversation id.
//!
//! Each call loads the stored transcript (or seeds a new one with the system
//! instruction), appends the user's message, asks the completion backend for
//! a reply over the whole transcript, appends the reply and writes the
//! transcript back. Stored history is always a prefix of the next version;
//! nothing is dropped or reordered.
//!
//! Calls for the same id are serialized inside this process. Two processes
//! sharing one transcript directory can still lose updates (last writer
//! wins).

use std::sync::Arc;

use pace_core::models::transcript::{ChatMessage, Transcript};
use pace_storage::transcripts::TranscriptStore;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::completion::ChatCompletion;
use crate::error::ChatError;
use crate::locks::ConversationLocks;

/// Result of one successful round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatExchange {
    pub conversation_id: Uuid,
    pub message: String,
    pub reply: String,
}

pub struct ConversationProxy {
    store: Arc<dyn TranscriptStore>,
    completion: Arc<dyn ChatCompletion>,
    system_prompt: String,
    locks: ConversationLocks,
}

impl ConversationProxy {
    pub fn new(
        store: Arc<dyn TranscriptStore>,
        completion: Arc<dyn ChatCompletion>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            store,
            completion,
            system_prompt: system_prompt.into(),
            locks: ConversationLocks::new(),
        }
    }

    /// Send `message` in conversation `conversation_id` and return the reply.
    ///
    /// Surrounding whitespace is dropped from `message` before it is stored
    /// or sent. Input is checked before the store or the upstream is touched.
    /// If the upstream fails, the stored transcript is left as it was.
    pub async fn send_message(
        &self,
        conversation_id: &str,
        message: &str,
    ) -> Result<ChatExchange, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let id = Uuid::parse_str(conversation_id)
            .map_err(|_| ChatError::InvalidConversationId(conversation_id.to_string()))?;

        let _guard = self.locks.acquire(id).await;

        let mut transcript = match self.store.load(id).await? {
            Some(existing) => existing,
            None => {
                info!(%id, "starting new conversation");
                Transcript::seeded(self.system_prompt.as_str())
            }
        };

        transcript.push(ChatMessage::user(message));

        let reply = self
            .completion
            .complete(transcript.messages())
            .await
            .inspect_err(|e| warn!(%id, error = %e, "chat completion failed"))?;

        transcript.push(ChatMessage::assistant(reply.as_str()));
        self.store.save(id, &transcript).await?;

        info!(%id, messages = transcript.len(), "conversation updated");

        Ok(ChatExchange {
            conversation_id: id,
            message: message.to_string(),
            reply,
        })
    }
}
