use axum::Json;
use axum::extract::{Query, State};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::StatusCode;
use serde::Serialize;

use pace_core::image_url::build_image_url_with_base;
use pace_core::validation::ImageQuery;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ImageUrlResponse {
    pub url: String,
}

#[derive(Serialize)]
pub struct ImageResponse {
    pub image_base64: String,
}

fn resolve_url(state: &AppState, query: &ImageQuery) -> Result<String, ApiError> {
    let request = query.validate()?;
    Ok(build_image_url_with_base(&state.archive_base_url, &request)?)
}

/// Build the archive URL without contacting the archive.
pub async fn get_image_url(
    State(state): State<AppState>,
    Query(query): Query<ImageQuery>,
) -> Result<Json<ImageUrlResponse>, ApiError> {
    let url = resolve_url(&state, &query)?;
    Ok(Json(ImageUrlResponse { url }))
}

/// Fetch the archive image once and return it base64-encoded.
pub async fn get_image(
    State(state): State<AppState>,
    Query(query): Query<ImageQuery>,
) -> Result<Json<ImageResponse>, ApiError> {
    let url = resolve_url(&state, &query)?;

    let resp = state
        .archive
        .get(&url)
        .send()
        .await
        .map_err(|e| ApiError::Upstream(format!("archive request failed: {e}")))?;

    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(format!("image not found: {url}")));
    }
    if !status.is_success() {
        return Err(ApiError::Upstream(format!("archive returned {status} for {url}")));
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| ApiError::Upstream(format!("archive read failed: {e}")))?;

    tracing::debug!(%url, bytes = bytes.len(), "archive image fetched");

    Ok(Json(ImageResponse {
        image_base64: STANDARD.encode(&bytes),
    }))
}
