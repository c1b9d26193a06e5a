//! Speech adapter - Implements SpeechPort using the ai_speech crate

use std::path::Path;
use std::sync::Arc;

use ai_speech::{
    AudioData, GoogleTtsProvider, SpeechConfig, SpeechError, SpeechToText, TextToSpeech,
    Transcription, WhisperCppProvider,
};
use application::error::ApplicationError;
use application::ports::{SpeechPort, SynthesisResult, TranscriptionResult};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Adapter combining a transcriber and a synthesizer behind [`SpeechPort`]
pub struct SpeechAdapter {
    stt: Arc<dyn SpeechToText>,
    tts: Arc<dyn TextToSpeech>,
}

impl std::fmt::Debug for SpeechAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechAdapter")
            .field("stt", &self.stt.model_name())
            .field("tts", &self.tts.provider_name())
            .finish()
    }
}

impl SpeechAdapter {
    /// Create the adapter with whisper.cpp and Google Translate TTS
    ///
    /// # Errors
    ///
    /// Returns an error if either provider fails to initialize.
    pub fn new(config: SpeechConfig) -> Result<Self, ApplicationError> {
        let stt = WhisperCppProvider::new(config.stt)
            .map_err(|e: SpeechError| ApplicationError::Configuration(e.to_string()))?;
        let tts = GoogleTtsProvider::new(config.tts)
            .map_err(|e: SpeechError| ApplicationError::Configuration(e.to_string()))?;

        Ok(Self::from_providers(Arc::new(stt), Arc::new(tts)))
    }

    /// Create the adapter from already constructed providers
    pub fn from_providers(stt: Arc<dyn SpeechToText>, tts: Arc<dyn TextToSpeech>) -> Self {
        Self { stt, tts }
    }

    /// Map speech error to application error
    fn map_error(err: SpeechError) -> ApplicationError {
        match err {
            SpeechError::Configuration(e) => ApplicationError::Configuration(e),
            SpeechError::InvalidInput(e) => {
                ApplicationError::ExternalService(format!("Invalid input: {e}"))
            },
            SpeechError::InvalidAudio(e) => {
                ApplicationError::ExternalService(format!("Invalid audio: {e}"))
            },
            SpeechError::RateLimited => ApplicationError::RateLimited,
            SpeechError::Timeout => {
                ApplicationError::ExternalService("Speech service timed out".to_string())
            },
            SpeechError::ConnectionFailed(e)
            | SpeechError::RequestFailed(e)
            | SpeechError::NotAvailable(e) => ApplicationError::ExternalService(e),
            SpeechError::TranscriptionFailed(e) => {
                ApplicationError::ExternalService(format!("Transcription failed: {e}"))
            },
            SpeechError::SynthesisFailed(e) => {
                ApplicationError::ExternalService(format!("Synthesis failed: {e}"))
            },
            SpeechError::AudioProcessing(e) => {
                ApplicationError::ExternalService(format!("Audio processing failed: {e}"))
            },
        }
    }
}

#[async_trait]
impl SpeechPort for SpeechAdapter {
    #[instrument(skip(self, path), fields(model = %self.stt.model_name()))]
    async fn transcribe_file(
        &self,
        path: &Path,
        language: &str,
    ) -> Result<TranscriptionResult, ApplicationError> {
        let transcription: Transcription = self
            .stt
            .transcribe_file(path, language)
            .await
            .map_err(Self::map_error)?;

        debug!(
            text_len = transcription.text.len(),
            language = ?transcription.language,
            "Transcription complete"
        );

        Ok(TranscriptionResult {
            text: transcription.text,
            language: transcription.language,
        })
    }

    #[instrument(skip(self, text), fields(text_len = text.len(), provider = %self.tts.provider_name()))]
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
    ) -> Result<SynthesisResult, ApplicationError> {
        let audio: AudioData = self
            .tts
            .synthesize(text, language)
            .await
            .map_err(Self::map_error)?;

        let format = audio.format();
        debug!(audio_size = audio.len(), format = %format, "Synthesis complete");

        Ok(SynthesisResult {
            audio_data: audio.into_bytes(),
            format,
        })
    }

    async fn is_transcriber_available(&self) -> bool {
        self.stt.is_available().await
    }
}
