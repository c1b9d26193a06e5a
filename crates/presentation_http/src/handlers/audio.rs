//! Scratch audio file server

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use domain::AudioFormat;
use tracing::{debug, instrument};

use crate::{error::ApiError, state::AppState};

/// Serve a synthesized file from the scratch directory
///
/// Unknown or malformed names are 404. The body is always labelled
/// `audio/mpeg`.
#[instrument(skip(state))]
pub async fn serve_audio(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let (name, data) = state
        .speech_service
        .open_audio(&filename)
        .await
        .map_err(|e| match e {
            application::ApplicationError::NotFound(_) => {
                ApiError::NotFound("Audio file not found".to_string())
            },
            other => ApiError::Internal(other.to_string()),
        })?;

    debug!(file = %name, bytes = data.len(), "Serving audio");

    Ok((
        [
            (header::CONTENT_TYPE, AudioFormat::Mp3.mime_type()),
            (header::CACHE_CONTROL, "no-store"),
        ],
        data,
    )
        .into_response())
}
