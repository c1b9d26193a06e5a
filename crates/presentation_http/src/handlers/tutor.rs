//! Conversation handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    error::ApiError,
    middleware::{ValidatedJson, not_blank},
    state::AppState,
};

/// Longest message accepted from a learner, in characters
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Upper bound for `max_length`
pub const MAX_REPLY_WORDS: usize = 500;

/// Body of `POST /api/send_text`
#[derive(Debug, Deserialize, Validate)]
pub struct SendTextRequest {
    /// What the learner said
    #[serde(default)]
    #[validate(custom(function = "not_blank"), length(max = 2000))]
    pub message: String,
    /// CEFR level code, A1 when absent or unknown
    #[serde(default)]
    pub level: Option<String>,
    /// Word limit for the reply
    #[serde(default)]
    #[validate(range(min = 1, max = 500))]
    pub max_length: Option<usize>,
}

/// Body returned by `POST /api/send_text`
#[derive(Debug, Serialize, Deserialize)]
pub struct SendTextResponse {
    /// Spanish reply, possibly truncated
    pub reply: String,
    /// Arabic translation or the unavailable placeholder
    pub arabic: String,
}

/// Reply to a learner message with a translated answer
#[instrument(skip(state, request), fields(level = ?request.level, max_length = ?request.max_length))]
pub async fn send_text(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SendTextRequest>,
) -> Result<Json<SendTextResponse>, ApiError> {
    let reply = state
        .tutor_service
        .respond(&request.message, request.level.as_deref(), request.max_length)
        .await
        .map_err(|e| ApiError::from_service("AI response failed", e))?;

    info!(
        truncated = reply.truncated,
        translated = reply.translation.is_available(),
        "Tutor reply sent"
    );

    Ok(Json(SendTextResponse {
        arabic: reply.translation.as_display_text().to_string(),
        reply: reply.reply,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(message: &str, max_length: Option<usize>) -> SendTextRequest {
        SendTextRequest {
            message: message.to_string(),
            level: None,
            max_length,
        }
    }

    #[test]
    fn limits_match_validation_rules() {
        assert!(request(&"a".repeat(MAX_MESSAGE_CHARS), None).validate().is_ok());
        assert!(
            request(&"a".repeat(MAX_MESSAGE_CHARS + 1), None)
                .validate()
                .is_err()
        );
        assert!(request("hola", Some(MAX_REPLY_WORDS)).validate().is_ok());
        assert!(request("hola", Some(MAX_REPLY_WORDS + 1)).validate().is_err());
    }

    #[test]
    fn zero_max_length_is_invalid() {
        assert!(request("hola", Some(0)).validate().is_err());
    }

    #[test]
    fn optional_fields_default() {
        let req: SendTextRequest = serde_json::from_str(r#"{"message":"Hola"}"#).unwrap();
        assert!(req.level.is_none());
        assert!(req.max_length.is_none());
        assert!(req.validate().is_ok());
    }
}
