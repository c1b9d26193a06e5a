//! Tutor configuration.

use application::TutorOptions;
use domain::DEFAULT_MAX_WORDS;
use serde::{Deserialize, Serialize};

/// Defaults for the conversation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorConfig {
    /// Word limit applied when a request omits `max_length`
    #[serde(default = "default_max_words")]
    pub default_max_words: usize,

    /// Language code for speech recognition and synthesis
    #[serde(default = "default_speech_language")]
    pub speech_language: String,
}

const fn default_max_words() -> usize {
    DEFAULT_MAX_WORDS
}

fn default_speech_language() -> String {
    application::DEFAULT_SPEECH_LANGUAGE.to_string()
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            default_max_words: default_max_words(),
            speech_language: default_speech_language(),
        }
    }
}

impl TutorConfig {
    /// Service options, using `max_tokens` from the inference section
    #[must_use]
    pub const fn options(&self, max_tokens: u32) -> TutorOptions {
        TutorOptions {
            max_tokens,
            default_max_words: self.default_max_words,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_max_words == 0 {
            return Err("tutor.default_max_words must be greater than 0".to_string());
        }
        if self.speech_language.trim().is_empty() {
            return Err("tutor.speech_language must not be empty".to_string());
        }
        Ok(())
    }
}
