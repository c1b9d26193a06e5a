//! Speech handlers: recognition of uploads and synthesis to scratch files

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Multipart field carrying the recording
pub const AUDIO_FIELD: &str = "audio";

/// Body returned by `POST /api/stt`
#[derive(Debug, Serialize, Deserialize)]
pub struct SpeechToTextResponse {
    /// Recognized Spanish text
    pub text: String,
}

/// Body of `POST /api/tts`
#[derive(Debug, Deserialize, Validate)]
pub struct TextToSpeechRequest {
    /// Text to speak
    #[serde(default)]
    pub text: String,
}

/// Body returned by `POST /api/tts`
#[derive(Debug, Serialize, Deserialize)]
pub struct TextToSpeechResponse {
    /// Relative URL of the synthesized MP3
    pub audio_url: String,
}

/// Transcribe the `audio` field of a multipart upload
#[instrument(skip_all)]
pub async fn speech_to_text(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SpeechToTextResponse>, ApiError> {
    let mut audio = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        if field.name() == Some(AUDIO_FIELD) {
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            audio = Some(data);
            break;
        }
    }

    let audio = audio.ok_or_else(|| ApiError::BadRequest("No audio file provided".to_string()))?;
    debug!(bytes = audio.len(), "Audio upload received");

    let transcription = state
        .speech_service
        .transcribe_upload(&audio)
        .await
        .map_err(|e| ApiError::from_service("STT failed", e))?;

    Ok(Json(SpeechToTextResponse {
        text: transcription.text,
    }))
}

/// Synthesize Spanish speech and return where to fetch it
#[instrument(skip_all)]
pub async fn text_to_speech(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TextToSpeechRequest>,
) -> Result<Json<TextToSpeechResponse>, ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("No text provided".to_string()));
    }

    let name = state
        .speech_service
        .synthesize_to_scratch(&request.text)
        .await
        .map_err(|e| ApiError::from_service("TTS generation failed", e))?;

    Ok(Json(TextToSpeechResponse {
        audio_url: format!("/temp/{name}"),
    }))
}
