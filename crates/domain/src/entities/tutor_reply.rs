//! Tutor replies, truncation and translation outcomes

use serde::{Deserialize, Serialize};

/// Appended to a reply that was cut at the word limit
pub const TRUNCATION_MARKER: &str = "...";

/// Word limit applied when the client does not send one
pub const DEFAULT_MAX_WORDS: usize = 50;

/// Shown instead of a translation when the translation call failed
/// ("translation not available")
pub const TRANSLATION_PLACEHOLDER: &str = "ترجمة غير متاحة";

/// Result of cutting a text down to a word limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncatedText {
    /// The resulting text
    pub text: String,
    /// Whether any words were dropped
    pub truncated: bool,
}

/// Limit `text` to `max_words` whitespace-separated words
///
/// Text at or under the limit is returned unmodified. Longer text keeps its
/// first `max_words` words joined by single spaces, followed directly by
/// [`TRUNCATION_MARKER`].
#[must_use]
pub fn truncate_words(text: &str, max_words: usize) -> TruncatedText {
    let words: Vec<&str> = text.split_whitespace().collect();

    if words.len() <= max_words {
        return TruncatedText {
            text: text.to_string(),
            truncated: false,
        };
    }

    let mut kept = words[..max_words].join(" ");
    kept.push_str(TRUNCATION_MARKER);

    TruncatedText {
        text: kept,
        truncated: true,
    }
}

/// Outcome of the best-effort translation step
///
/// Translation never fails the surrounding request; a failed call becomes
/// [`Translation::Unavailable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum Translation {
    /// Translated text, trimmed
    Translated(String),
    /// The translation call failed
    Unavailable,
}

impl Translation {
    /// Build from raw completion output, trimming surrounding whitespace
    pub fn from_completion(raw: &str) -> Self {
        Self::Translated(raw.trim().to_string())
    }

    /// Text to display: the translation or the placeholder
    #[must_use]
    pub fn as_display_text(&self) -> &str {
        match self {
            Self::Translated(text) => text,
            Self::Unavailable => TRANSLATION_PLACEHOLDER,
        }
    }

    /// Whether a translation was produced
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Translated(_))
    }
}

/// A tutor reply ready to be returned to the learner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorReply {
    /// Spanish reply, possibly truncated
    pub reply: String,
    /// Arabic translation of `reply`
    pub translation: Translation,
    /// Whether `reply` was cut at the word limit
    pub truncated: bool,
}
