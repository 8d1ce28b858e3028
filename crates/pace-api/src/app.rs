use std::sync::Arc;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use pace_chat::completion::OpenAiClient;
use pace_chat::conversation::ConversationProxy;
use pace_storage::transcripts::FileTranscriptStore;

use crate::config::ServerConfig;
use crate::middleware;
use crate::routes;
use crate::state::AppState;

/// Wire the production collaborators described by `config`.
pub fn build_state(config: &ServerConfig) -> eyre::Result<AppState> {
    let archive = reqwest::Client::builder()
        .timeout(config.archive_timeout)
        .build()?;

    let store = Arc::new(FileTranscriptStore::new(&config.chat_dir));
    let completion = Arc::new(OpenAiClient::new(config.openai.clone())?);
    let chat = ConversationProxy::new(store, completion, config.system_prompt()?);

    Ok(AppState {
        archive,
        archive_base_url: Arc::from(config.archive_base_url.as_str()),
        chat: Arc::new(chat),
    })
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Imagery
        .route("/image/", get(routes::image::get_image))
        .route("/image_url/", get(routes::image::get_image_url))
        .route("/get_image_url/", get(routes::image::get_image_url))
        // Choice listings
        .route("/product/", get(routes::catalog::list_products))
        .route("/resolution/", get(routes::catalog::list_resolutions))
        .route("/period/", get(routes::catalog::list_periods))
        // Chat
        .route("/chat/", post(routes::chat::send_message))
        .layer(
            ServiceBuilder::new()
                .layer(axum_mw::from_fn(middleware::access::access_log))
                .layer(cors),
        )
        .with_state(state)
}
