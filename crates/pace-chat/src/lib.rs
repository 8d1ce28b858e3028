//! pace-chat
//!
//! Chat-completion access and the conversation proxy that keeps a persisted
//! transcript per conversation.

pub mod completion;
pub mod conversation;
pub mod error;
pub mod locks;
pub mod prompt;
