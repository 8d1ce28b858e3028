//! pace-storage
//!
//! Keyed blob storage on the local filesystem, JSON state helpers, and the
//! transcript store used by the conversation proxy.

pub mod error;
pub mod objects;
pub mod state;
pub mod transcripts;
