//! Tutor service - Level-aware replies with a best-effort Arabic translation

use std::{fmt, sync::Arc};

use domain::{
    DEFAULT_MAX_WORDS, ProficiencyLevel, Translation, TutorPrompt, TutorReply, truncate_words,
};
use tracing::{debug, instrument, warn};

use crate::{error::ApplicationError, ports::InferencePort};

/// Tunables for [`TutorService`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TutorOptions {
    /// Completion token cap for both the reply and the translation
    pub max_tokens: u32,
    /// Word limit applied when the caller sends none
    pub default_max_words: usize,
}

impl Default for TutorOptions {
    fn default() -> Self {
        Self {
            max_tokens: 100,
            default_max_words: DEFAULT_MAX_WORDS,
        }
    }
}

/// Service answering learner messages
pub struct TutorService {
    inference: Arc<dyn InferencePort>,
    options: TutorOptions,
}

impl fmt::Debug for TutorService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TutorService")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl TutorService {
    /// Create a tutor service with default options
    pub fn new(inference: Arc<dyn InferencePort>) -> Self {
        Self::with_options(inference, TutorOptions::default())
    }

    /// Create a tutor service with explicit options
    pub fn with_options(inference: Arc<dyn InferencePort>, options: TutorOptions) -> Self {
        Self { inference, options }
    }

    /// Reply to `message` at the requested level
    ///
    /// Unknown or missing levels use A1. The reply is cut to `max_words`
    /// (or the configured default) and then translated. Only a failure of
    /// the reply itself is an error; the translation degrades to
    /// [`Translation::Unavailable`].
    #[instrument(skip(self, message), fields(message_len = message.len()))]
    pub async fn respond(
        &self,
        message: &str,
        level: Option<&str>,
        max_words: Option<usize>,
    ) -> Result<TutorReply, ApplicationError> {
        let level = ProficiencyLevel::resolve(level);
        let max_words = max_words.unwrap_or(self.options.default_max_words);

        let prompt = TutorPrompt::conversation(level, message);
        let result = self
            .inference
            .complete(&prompt, self.options.max_tokens)
            .await?;

        debug!(
            level = %level,
            model = %result.model,
            tokens = ?result.tokens_used,
            latency_ms = result.latency_ms,
            "Tutor reply generated"
        );

        let truncated = truncate_words(&result.content, max_words);
        let translation = self.translate(&truncated.text).await;

        Ok(TutorReply {
            reply: truncated.text,
            translation,
            truncated: truncated.truncated,
        })
    }

    /// Translate Spanish `text` to Arabic, never failing
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn translate(&self, text: &str) -> Translation {
        let prompt = TutorPrompt::translation(text);
        match self.inference.complete(&prompt, self.options.max_tokens).await {
            Ok(result) => Translation::from_completion(&result.content),
            Err(e) => {
                warn!(error = %e, "Translation failed, using placeholder");
                Translation::Unavailable
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use domain::{TRANSLATION_INSTRUCTION, TRANSLATION_PLACEHOLDER};

    use super::*;
    use crate::ports::{InferenceResult, MockInferencePort};

    fn result(content: &str) -> InferenceResult {
        InferenceResult {
            content: content.to_string(),
            model: "test-model".to_string(),
            tokens_used: Some(42),
            latency_ms: 100,
        }
    }

    fn is_translation(prompt: &TutorPrompt) -> bool {
        prompt.instruction == TRANSLATION_INSTRUCTION
    }

    #[test]
    fn debug_hides_port() {
        let service = TutorService::new(Arc::new(MockInferencePort::new()));
        let debug = format!("{service:?}");
        assert!(debug.contains("TutorService"));
        assert!(debug.contains("options"));
    }

    #[tokio::test]
    async fn long_reply_is_truncated_then_translated() {
        let mut mock = MockInferencePort::new();
        mock.expect_complete()
            .withf(|p, _| !is_translation(p))
            .times(1)
            .returning(|_, _| Ok(result("uno dos tres cuatro cinco seis")));
        mock.expect_complete()
            .withf(|p, _| {
                is_translation(p) && p.message.ends_with("uno dos tres cuatro cinco...")
            })
            .times(1)
            .returning(|_, _| Ok(result("  واحد اثنان ثلاثة أربعة خمسة... \n")));

        let service = TutorService::new(Arc::new(mock));
        let reply = service.respond("Hola", Some("A1"), Some(5)).await.unwrap();

        assert_eq!(reply.reply, "uno dos tres cuatro cinco...");
        assert!(reply.truncated);
        assert_eq!(
            reply.translation,
            Translation::Translated("واحد اثنان ثلاثة أربعة خمسة...".to_string())
        );
    }

    #[tokio::test]
    async fn short_reply_passes_through() {
        let mut mock = MockInferencePort::new();
        mock.expect_complete()
            .withf(|p, _| !is_translation(p))
            .returning(|_, _| Ok(result("¡Hola! ¿Cómo estás?")));
        mock.expect_complete()
            .withf(|p, _| is_translation(p))
            .returning(|_, _| Ok(result("مرحبا! كيف حالك؟")));

        let service = TutorService::new(Arc::new(mock));
        let reply = service.respond("Hola", None, None).await.unwrap();

        assert_eq!(reply.reply, "¡Hola! ¿Cómo estás?");
        assert!(!reply.truncated);
    }

    #[tokio::test]
    async fn unknown_level_uses_a1_instruction() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);

        let mut mock = MockInferencePort::new();
        mock.expect_complete().returning(move |p, _| {
            seen_clone.lock().unwrap().push(p.instruction.clone());
            Ok(result("Hola"))
        });

        let service = TutorService::new(Arc::new(mock));
        service.respond("Hola", Some("Z9"), None).await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0], ProficiencyLevel::A1.instruction());
    }

    #[tokio::test]
    async fn level_selects_instruction_and_token_cap() {
        let mut mock = MockInferencePort::new();
        mock.expect_complete()
            .withf(|p, max| {
                p.instruction == ProficiencyLevel::C1.instruction() && p.message == "Hola" && *max == 100
            })
            .times(1)
            .returning(|_, _| Ok(result("Saludos")));
        mock.expect_complete()
            .withf(|p, _| is_translation(p))
            .returning(|_, _| Ok(result("تحيات")));

        let service = TutorService::new(Arc::new(mock));
        assert!(service.respond("Hola", Some("C1"), None).await.is_ok());
    }

    #[tokio::test]
    async fn translation_failure_keeps_reply() {
        let mut mock = MockInferencePort::new();
        mock.expect_complete()
            .withf(|p, _| !is_translation(p))
            .returning(|_, _| Ok(result("Muy bien")));
        mock.expect_complete()
            .withf(|p, _| is_translation(p))
            .returning(|_, _| Err(ApplicationError::Inference("Status 502".to_string())));

        let service = TutorService::new(Arc::new(mock));
        let reply = service.respond("Hola", Some("B1"), None).await.unwrap();

        assert_eq!(reply.reply, "Muy bien");
        assert_eq!(reply.translation, Translation::Unavailable);
        assert_eq!(reply.translation.as_display_text(), TRANSLATION_PLACEHOLDER);
    }

    #[tokio::test]
    async fn primary_failure_skips_translation() {
        let mut mock = MockInferencePort::new();
        mock.expect_complete()
            .times(1)
            .returning(|_, _| Err(ApplicationError::Inference("timeout".to_string())));

        let service = TutorService::new(Arc::new(mock));
        let result = service.respond("Hola", None, None).await;

        assert!(matches!(result, Err(ApplicationError::Inference(_))));
    }

    #[tokio::test]
    async fn configured_default_word_limit_applies() {
        let mut mock = MockInferencePort::new();
        mock.expect_complete()
            .withf(|p, _| !is_translation(p))
            .returning(|_, _| Ok(result("a b c d")));
        mock.expect_complete()
            .withf(|p, _| is_translation(p))
            .returning(|_, _| Ok(result("أ ب")));

        let options = TutorOptions {
            max_tokens: 100,
            default_max_words: 2,
        };
        let service = TutorService::with_options(Arc::new(mock), options);
        let reply = service.respond("Hola", None, None).await.unwrap();

        assert_eq!(reply.reply, "a b...");
    }
}
