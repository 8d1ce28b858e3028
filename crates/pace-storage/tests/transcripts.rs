use pace_core::models::transcript::{ChatMessage, Transcript};
use pace_storage::error::StorageError;
use pace_storage::objects;
use pace_storage::transcripts::{FileTranscriptStore, MemoryTranscriptStore, TranscriptStore};
use uuid::Uuid;

fn sample() -> Transcript {
    let mut t = Transcript::seeded("system prompt");
    t.push(ChatMessage::user("What does OCI measure?"));
    t.push(ChatMessage::assistant("Ocean color across many wavelengths."));
    t
}

#[tokio::test]
async fn missing_conversation_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTranscriptStore::new(dir.path().join("chats"));

    assert!(store.load(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTranscriptStore::new(dir.path().join("chats"));
    let id = Uuid::new_v4();

    store.save(id, &sample()).await.unwrap();
    let loaded = store.load(id).await.unwrap().unwrap();

    assert_eq!(loaded, sample());
}

#[tokio::test]
async fn directory_is_created_lazily() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("nested").join("chats");
    let store = FileTranscriptStore::new(&root);
    let id = Uuid::new_v4();

    assert!(!root.exists());
    store.save(id, &sample()).await.unwrap();
    assert!(root.join(format!("{id}.json")).is_file());
}

#[tokio::test]
async fn file_holds_bare_message_array() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTranscriptStore::new(dir.path());
    let id = Uuid::new_v4();

    store.save(id, &sample()).await.unwrap();
    let raw = std::fs::read(dir.path().join(format!("{id}.json"))).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();

    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["role"], "system");
    assert_eq!(entries[2]["content"], "Ocean color across many wavelengths.");
}

#[tokio::test]
async fn save_overwrites_previous_transcript() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTranscriptStore::new(dir.path());
    let id = Uuid::new_v4();

    store.save(id, &Transcript::seeded("old")).await.unwrap();
    store.save(id, &sample()).await.unwrap();

    assert_eq!(store.load(id).await.unwrap().unwrap(), sample());
    let files: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(files, vec![format!("{id}.json")]);
}

#[tokio::test]
async fn corrupt_file_is_a_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTranscriptStore::new(dir.path());
    let id = Uuid::new_v4();
    std::fs::write(dir.path().join(format!("{id}.json")), b"not json").unwrap();

    let err = store.load(id).await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[tokio::test]
async fn keys_cannot_escape_root() {
    let dir = tempfile::tempdir().unwrap();

    for key in ["../x.json", "a/b.json", "", "..", ".hidden"] {
        let err = objects::put_object(dir.path(), key, b"{}".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey { .. }), "key {key:?}");
    }
}

#[tokio::test]
async fn missing_object_is_not_found() {
    let dir = tempfile::tempdir().unwrap();

    let err = objects::get_object(dir.path(), "a.json").await.err().unwrap();
    assert!(matches!(err, StorageError::NotFound { key } if key == "a.json"));
}

#[tokio::test]
async fn memory_store_round_trips() {
    let store = MemoryTranscriptStore::new();
    let id = Uuid::new_v4();

    assert!(store.load(id).await.unwrap().is_none());
    store.save(id, &sample()).await.unwrap();
    assert_eq!(store.load(id).await.unwrap().unwrap(), sample());
    assert_eq!(store.len().await, 1);
}
