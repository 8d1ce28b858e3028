use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// One async mutex per conversation id.
///
/// Serializes load/append/save for the same conversation inside this
/// process. Entries nobody holds are dropped on the next acquire.
#[derive(Debug, Default)]
pub struct ConversationLocks {
    inner: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl ConversationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `id`. Released when the guard drops.
    pub async fn acquire(&self, id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            map.retain(|_, lock| Arc::strong_count(lock) > 1);
            map.entry(id).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Number of conversations currently tracked.
    pub async fn tracked(&self) -> usize {
        self.inner.lock().await.len()
    }
}
