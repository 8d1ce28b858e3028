use std::sync::Arc;

use pace_chat::conversation::ConversationProxy;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    /// Client for archive image fetches, with its own timeout.
    pub archive: reqwest::Client,
    /// Archive root the image URLs are built against.
    pub archive_base_url: Arc<str>,
    pub chat: Arc<ConversationProxy>,
}
