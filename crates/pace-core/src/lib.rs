//! pace-core
//!
//! Pure domain types for the PACE imagery service: the product catalog,
//! request validation, archive URL construction, chat transcripts and
//! storage key conventions. No network or filesystem dependency.

pub mod catalog;
pub mod error;
pub mod image_url;
pub mod keys;
pub mod models;
pub mod validation;
