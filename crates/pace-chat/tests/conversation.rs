use std::sync::{Arc, Mutex};
use std::time::Duration;

use pace_chat::completion::{BoxFuture, ChatCompletion};
use pace_chat::conversation::ConversationProxy;
use pace_chat::error::ChatError;
use pace_core::models::transcript::{ChatMessage, ChatRole, Transcript};
use pace_storage::transcripts::{MemoryTranscriptStore, TranscriptStore};
use uuid::Uuid;

const PROMPT: &str = "Only talk about PACE.";

/// Records every transcript it is asked to complete.
#[derive(Default)]
struct RecordingCompletion {
    calls: Mutex<Vec<Vec<ChatMessage>>>,
    fail: bool,
    delay: Option<Duration>,
}

impl RecordingCompletion {
    fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }
}

impl ChatCompletion for RecordingCompletion {
    fn complete<'a>(
        &'a self,
        messages: &'a [ChatMessage],
    ) -> BoxFuture<'a, Result<String, ChatError>> {
        Box::pin(async move {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let n = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(messages.to_vec());
                calls.len()
            };
            if self.fail {
                return Err(ChatError::Upstream("503 Service Unavailable: overloaded".to_string()));
            }
            Ok(format!("reply {n}"))
        })
    }
}

fn proxy(
    completion: Arc<RecordingCompletion>,
) -> (ConversationProxy, Arc<MemoryTranscriptStore>) {
    let store = Arc::new(MemoryTranscriptStore::new());
    let proxy = ConversationProxy::new(store.clone(), completion, PROMPT);
    (proxy, store)
}

#[tokio::test]
async fn first_message_seeds_system_prompt() {
    let completion = Arc::new(RecordingCompletion::default());
    let (proxy, store) = proxy(completion.clone());
    let id = Uuid::new_v4();

    let exchange = proxy
        .send_message(&id.to_string(), "What is PACE?")
        .await
        .unwrap();

    assert_eq!(exchange.conversation_id, id);
    assert_eq!(exchange.message, "What is PACE?");
    assert_eq!(exchange.reply, "reply 1");

    let calls = completion.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0],
        vec![ChatMessage::system(PROMPT), ChatMessage::user("What is PACE?")]
    );

    let stored = store.load(id).await.unwrap().unwrap();
    let roles: Vec<ChatRole> = stored.messages().iter().map(|m| m.role).collect();
    assert_eq!(roles, [ChatRole::System, ChatRole::User, ChatRole::Assistant]);
}

#[tokio::test]
async fn second_message_extends_history() {
    let completion = Arc::new(RecordingCompletion::default());
    let (proxy, store) = proxy(completion.clone());
    let id = Uuid::new_v4();

    proxy.send_message(&id.to_string(), "first").await.unwrap();
    let after_first = store.load(id).await.unwrap().unwrap();

    proxy.send_message(&id.to_string(), "second").await.unwrap();
    let after_second = store.load(id).await.unwrap().unwrap();

    assert!(after_second.extends(&after_first));
    assert_eq!(after_second.len(), after_first.len() + 2);

    let calls = completion.calls();
    assert_eq!(calls[1].len(), 4);
    assert_eq!(calls[1][..3], *after_first.messages());
    assert_eq!(calls[1][3], ChatMessage::user("second"));
}

#[tokio::test]
async fn existing_transcript_is_reused_without_reseeding() {
    let completion = Arc::new(RecordingCompletion::default());
    let (proxy, store) = proxy(completion.clone());
    let id = Uuid::new_v4();
    let existing = Transcript::from(vec![
        ChatMessage::system("an older prompt"),
        ChatMessage::user("hi"),
        ChatMessage::assistant("hello"),
    ]);
    store.save(id, &existing).await.unwrap();

    proxy.send_message(&id.to_string(), "again").await.unwrap();

    let sent = &completion.calls()[0];
    assert_eq!(sent[0], ChatMessage::system("an older prompt"));
    assert_eq!(sent.len(), 4);
}

#[tokio::test]
async fn blank_message_touches_nothing() {
    let completion = Arc::new(RecordingCompletion::default());
    let (proxy, store) = proxy(completion.clone());

    for blank in ["", "   ", "\n\t"] {
        let err = proxy
            .send_message(&Uuid::new_v4().to_string(), blank)
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::EmptyMessage));
    }

    assert!(completion.calls().is_empty());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn malformed_id_is_rejected() {
    let completion = Arc::new(RecordingCompletion::default());
    let (proxy, store) = proxy(completion.clone());

    let err = proxy.send_message("not-a-uuid", "hello").await.unwrap_err();

    assert!(matches!(err, ChatError::InvalidConversationId(id) if id == "not-a-uuid"));
    assert!(completion.calls().is_empty());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn upstream_failure_leaves_store_unchanged() {
    let completion = Arc::new(RecordingCompletion {
        fail: true,
        ..Default::default()
    });
    let (proxy, store) = proxy(completion.clone());
    let id = Uuid::new_v4();

    let err = proxy.send_message(&id.to_string(), "hello").await.unwrap_err();

    assert!(matches!(err, ChatError::Upstream(detail) if detail.contains("overloaded")));
    assert_eq!(completion.calls().len(), 1);
    assert!(store.load(id).await.unwrap().is_none());
}

#[tokio::test]
async fn concurrent_messages_to_one_conversation_are_not_lost() {
    let completion = Arc::new(RecordingCompletion {
        delay: Some(Duration::from_millis(5)),
        ..Default::default()
    });
    let (proxy, store) = proxy(completion.clone());
    let proxy = Arc::new(proxy);
    let id = Uuid::new_v4();

    let mut handles = Vec::new();
    for i in 0..8 {
        let proxy = proxy.clone();
        handles.push(tokio::spawn(async move {
            proxy
                .send_message(&id.to_string(), &format!("message {i}"))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = store.load(id).await.unwrap().unwrap();
    assert_eq!(stored.len(), 1 + 8 * 2);

    // Each upstream call saw the complete history of the calls before it.
    let calls = completion.calls();
    for (n, call) in calls.iter().enumerate() {
        assert_eq!(call.len(), 2 + n * 2);
    }
}

#[tokio::test]
async fn message_is_stored_and_echoed_trimmed() {
    let completion = Arc::new(RecordingCompletion::default());
    let (proxy, store) = proxy(completion.clone());
    let id = Uuid::new_v4();

    let exchange = proxy
        .send_message(&id.to_string(), "  hello  \n")
        .await
        .unwrap();

    assert_eq!(exchange.message, "hello");
    assert_eq!(completion.calls()[0][1], ChatMessage::user("hello"));
    let stored = store.load(id).await.unwrap().unwrap();
    assert_eq!(stored.messages()[1], ChatMessage::user("hello"));
}
