use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use pace_chat::error::ChatError;
use pace_core::error::CoreError;
use pace_core::validation::ValidationErrors;
use pace_storage::error::StorageError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Field-level input errors.
    Validation(ValidationErrors),
    NotFound(String),
    /// A third-party service failed; the detail is shown to the caller.
    Upstream(String),
    /// A fault on our side; the detail is logged and hidden.
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct ValidationBody {
    errors: ValidationErrors,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(errors) => {
                return (StatusCode::BAD_REQUEST, Json(ValidationBody { errors })).into_response();
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Upstream(msg) => {
                tracing::warn!("upstream error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

/// Core errors past validation mean the catalog and the validator disagree.
impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError::Internal(format!("catalog/validator drift: {e}"))
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::EmptyMessage => ApiError::Validation(ValidationErrors::single(
                "message",
                "message cannot be empty.",
            )),
            ChatError::InvalidConversationId(_) => ApiError::Validation(ValidationErrors::single(
                "chat_id",
                "chat_id must be a valid UUID.",
            )),
            ChatError::Upstream(detail) => ApiError::Upstream(detail),
            ChatError::Storage(e) => e.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
