use thiserror::Error;

use pace_storage::error::StorageError;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,

    #[error("invalid conversation id: {0}")]
    InvalidConversationId(String),

    #[error("chat completion failed: {0}")]
    Upstream(String),

    #[error("transcript storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("chat client config error: {0}")]
    Config(String),
}
