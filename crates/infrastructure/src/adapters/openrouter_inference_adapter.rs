//! OpenRouter inference adapter - Implements InferencePort using ai_core

use std::time::Instant;

use ai_core::{
    InferenceConfig, InferenceEngine, InferenceError, InferenceRequest, OpenRouterInferenceEngine,
};
use application::{
    error::ApplicationError,
    ports::{InferencePort, InferenceResult},
};
use async_trait::async_trait;
use domain::TutorPrompt;
use tracing::{debug, instrument, warn};

/// Adapter for the OpenRouter chat completion API
#[derive(Debug)]
pub struct OpenRouterInferenceAdapter {
    engine: OpenRouterInferenceEngine,
}

impl OpenRouterInferenceAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: InferenceConfig) -> Result<Self, ApplicationError> {
        let engine = OpenRouterInferenceEngine::new(config).map_err(|e| match e {
            InferenceError::Configuration(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::Inference(other.to_string()),
        })?;

        Ok(Self { engine })
    }

    /// Convert ai_core error to application error
    fn map_error(e: InferenceError) -> ApplicationError {
        match e {
            InferenceError::RateLimited => ApplicationError::RateLimited,
            InferenceError::Configuration(msg) => ApplicationError::Configuration(msg),
            InferenceError::ConnectionFailed(msg) => {
                ApplicationError::ExternalService(format!("OpenRouter connection failed: {msg}"))
            },
            InferenceError::Timeout => {
                ApplicationError::ExternalService("OpenRouter request timed out".to_string())
            },
            other => ApplicationError::Inference(other.to_string()),
        }
    }
}

#[async_trait]
impl InferencePort for OpenRouterInferenceAdapter {
    #[instrument(skip(self, prompt), fields(message_len = prompt.message.len()))]
    async fn complete(
        &self,
        prompt: &TutorPrompt,
        max_tokens: u32,
    ) -> Result<InferenceResult, ApplicationError> {
        let start = Instant::now();

        let request = InferenceRequest::with_system(&prompt.instruction, &prompt.message)
            .with_max_tokens(max_tokens);

        let response = self
            .engine
            .generate(request)
            .await
            .map_err(Self::map_error)?;

        #[allow(clippy::cast_possible_truncation)]
        let latency_ms = start.elapsed().as_millis() as u64;

        debug!(
            model = %response.model,
            tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
            finish_reason = ?response.finish_reason,
            latency_ms = latency_ms,
            "Completion received"
        );

        Ok(InferenceResult {
            content: response.content,
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
            latency_ms,
        })
    }

    async fn is_healthy(&self) -> bool {
        match self.engine.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!(error = %e, "OpenRouter health check failed");
                false
            },
        }
    }

    fn current_model(&self) -> String {
        self.engine.default_model().to_string()
    }
}
