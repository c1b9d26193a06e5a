//! Port definitions for speech processing
//!
//! Defines the traits (ports) that speech processing adapters must implement.

use std::path::Path;

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::{AudioData, Transcription};

/// Port for Speech-to-Text (STT) implementations
///
/// Implementations read an audio file that the caller owns and return its
/// transcription. They never delete or move the input file.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe the audio file at `path`
    ///
    /// # Arguments
    ///
    /// * `path` - Audio file to transcribe
    /// * `language` - ISO 639-1 language code (e.g., "es")
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if transcription fails.
    async fn transcribe_file(
        &self,
        path: &Path,
        language: &str,
    ) -> Result<Transcription, SpeechError>;

    /// Check if the STT backend is installed and ready
    async fn is_available(&self) -> bool;

    /// Get the name of the current STT model
    fn model_name(&self) -> &str;
}

/// Port for Text-to-Speech (TTS) implementations
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize `text` spoken in `language`
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if the text is empty or synthesis fails.
    async fn synthesize(&self, text: &str, language: &str) -> Result<AudioData, SpeechError>;

    /// Name of the synthesis backend
    fn provider_name(&self) -> &str;
}
