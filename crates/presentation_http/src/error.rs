//! API error handling
//!
//! Every failure leaves the server as `{error, code, details?}`. Upstream
//! failures keep the route's summary in `error` and the cause in `details`.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A completion, transcription or synthesis call failed
    #[error("{summary}: {details}")]
    Upstream {
        summary: &'static str,
        details: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Wrap a service failure with the route's summary
    ///
    /// Caller mistakes stay 400/404 with their own message; everything else
    /// is reported under `summary`.
    pub fn from_service(summary: &'static str, err: ApplicationError) -> Self {
        match err {
            ApplicationError::InvalidOperation(msg) => Self::BadRequest(msg),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::Domain(DomainError::NotFound { entity_type, id }) => {
                Self::NotFound(format!("{entity_type} {id}"))
            },
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            other => Self::Upstream {
                summary,
                details: other.to_string(),
            },
        }
    }

    /// HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::BadRequest(msg) => ErrorResponse {
                error: msg,
                code: "bad_request".to_string(),
                details: None,
            },
            Self::NotFound(msg) => ErrorResponse {
                error: msg,
                code: "not_found".to_string(),
                details: None,
            },
            Self::Upstream { summary, details } => {
                error!(summary, details = %details, "Upstream call failed");
                ErrorResponse {
                    error: summary.to_string(),
                    code: "upstream_error".to_string(),
                    details: Some(details),
                }
            },
            Self::Internal(msg) => {
                error!(error = %msg, "Internal error");
                ErrorResponse {
                    error: "An internal error occurred".to_string(),
                    code: "internal_error".to_string(),
                    details: Some(msg),
                }
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn upstream_failure_carries_summary_and_details() {
        let err = ApiError::from_service(
            "AI response failed",
            ApplicationError::Inference("Server error: Status 502".to_string()),
        );
        let (status, json) = body_json(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "AI response failed");
        assert_eq!(json["code"], "upstream_error");
        assert!(json["details"].as_str().unwrap().contains("502"));
    }

    #[tokio::test]
    async fn configuration_failure_is_upstream_error() {
        let err = ApiError::from_service(
            "AI response failed",
            ApplicationError::Configuration("no completion API key configured".to_string()),
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn invalid_operation_is_bad_request_without_details() {
        let err = ApiError::from_service(
            "STT failed",
            ApplicationError::InvalidOperation("audio upload is empty".to_string()),
        );
        let (status, json) = body_json(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "audio upload is empty");
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let err = ApiError::from_service(
            "TTS generation failed",
            ApplicationError::NotFound("audio file x.mp3".to_string()),
        );
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn error_response_omits_empty_details() {
        let resp = ErrorResponse {
            error: "No text provided".to_string(),
            code: "bad_request".to_string(),
            details: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("details"));
    }
}
