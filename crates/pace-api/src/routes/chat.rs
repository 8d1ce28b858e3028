use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;
use uuid::Uuid;

use pace_core::validation::{ChatInput, NON_FIELD_ERRORS, ValidationErrors};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ChatResponse {
    pub chat_id: Uuid,
    pub message: String,
    pub response: String,
}

/// Relay one message to the chat model within a persisted conversation.
pub async fn send_message(
    State(state): State<AppState>,
    body: Result<Json<ChatInput>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(input) =
        body.map_err(|e| ValidationErrors::single(NON_FIELD_ERRORS, e.body_text()))?;
    let (chat_id, message) = input.validate()?;

    let exchange = state.chat.send_message(&chat_id, &message).await?;

    Ok(Json(ChatResponse {
        chat_id: exchange.conversation_id,
        message: exchange.message,
        response: exchange.reply,
    }))
}
