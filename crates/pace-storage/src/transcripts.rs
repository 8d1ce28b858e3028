use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use pace_core::keys;
use pace_core::models::transcript::Transcript;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::StorageError;
use crate::state;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Keyed store of conversation transcripts.
///
/// Implementations hold no cache: every `load` observes the latest `save`.
pub trait TranscriptStore: Send + Sync {
    /// Fetch the transcript for `id`. `None` if the conversation is new.
    fn load(&self, id: Uuid) -> BoxFuture<'_, Result<Option<Transcript>, StorageError>>;

    /// Replace the transcript for `id`.
    fn save<'a>(
        &'a self,
        id: Uuid,
        transcript: &'a Transcript,
    ) -> BoxFuture<'a, Result<(), StorageError>>;
}

/// One JSON file per conversation, named `<id>.json`, under a directory
/// created on first save.
#[derive(Debug, Clone)]
pub struct FileTranscriptStore {
    root: PathBuf,
}

impl FileTranscriptStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TranscriptStore for FileTranscriptStore {
    fn load(&self, id: Uuid) -> BoxFuture<'_, Result<Option<Transcript>, StorageError>> {
        Box::pin(async move { state::load_state(&self.root, &keys::transcript(id)).await })
    }

    fn save<'a>(
        &'a self,
        id: Uuid,
        transcript: &'a Transcript,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            state::save_state(&self.root, &keys::transcript(id), transcript).await?;
            tracing::debug!(%id, messages = transcript.len(), "transcript saved");
            Ok(())
        })
    }
}

/// Process-local store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryTranscriptStore {
    transcripts: Mutex<HashMap<Uuid, Transcript>>,
}

impl MemoryTranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored conversations.
    pub async fn len(&self) -> usize {
        self.transcripts.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.transcripts.lock().await.is_empty()
    }
}

impl TranscriptStore for MemoryTranscriptStore {
    fn load(&self, id: Uuid) -> BoxFuture<'_, Result<Option<Transcript>, StorageError>> {
        Box::pin(async move { Ok(self.transcripts.lock().await.get(&id).cloned()) })
    }

    fn save<'a>(
        &'a self,
        id: Uuid,
        transcript: &'a Transcript,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.transcripts.lock().await.insert(id, transcript.clone());
            Ok(())
        })
    }
}
