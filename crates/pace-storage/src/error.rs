use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("invalid object key: {key}")]
    InvalidKey { key: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("read error for {key}: {message}")]
    Read { key: String, message: String },

    #[error("write error for {key}: {message}")]
    Write { key: String, message: String },
}
