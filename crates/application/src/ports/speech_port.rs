//! Speech port - Interface for speech-to-text and text-to-speech operations

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use domain::AudioFormat;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of a transcription operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionResult {
    /// Transcribed text
    pub text: String,
    /// Language the transcriber was asked for
    pub language: Option<String>,
}

/// Result of a speech synthesis operation
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// Generated audio data
    pub audio_data: Bytes,
    /// Format of the audio
    pub format: AudioFormat,
}

/// Port for speech processing operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Transcribe the audio file at `path` (Speech-to-Text)
    ///
    /// The file stays owned by the caller; implementations only read it.
    async fn transcribe_file(
        &self,
        path: &Path,
        language: &str,
    ) -> Result<TranscriptionResult, ApplicationError>;

    /// Synthesize speech from text (Text-to-Speech)
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
    ) -> Result<SynthesisResult, ApplicationError>;

    /// Check whether the transcriber is installed and usable
    async fn is_transcriber_available(&self) -> bool;
}
