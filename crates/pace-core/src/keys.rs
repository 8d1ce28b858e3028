//! Storage key conventions.
//!
//! Pure string functions. These define the canonical layout of objects in
//! the transcript store.

use uuid::Uuid;

/// Default directory (relative to the working directory) holding transcripts.
pub const CHATS_DIR: &str = "chats";

pub fn transcript(id: Uuid) -> String {
    format!("{id}.json")
}
