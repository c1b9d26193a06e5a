//! Speech service - Uploads to text and text to retrievable audio files

use std::{fmt, sync::Arc, time::Duration};

use bytes::Bytes;
use domain::{AudioFormat, ScratchFileName};
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{AudioStorePort, ScratchGuard, SpeechPort, TranscriptionResult},
};

/// Language used for transcription and synthesis
pub const DEFAULT_SPEECH_LANGUAGE: &str = "es";

/// Service for the speech round trips
pub struct SpeechService {
    speech: Arc<dyn SpeechPort>,
    store: Arc<dyn AudioStorePort>,
    language: String,
}

impl fmt::Debug for SpeechService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechService")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl SpeechService {
    /// Create a speech service for Spanish
    pub fn new(speech: Arc<dyn SpeechPort>, store: Arc<dyn AudioStorePort>) -> Self {
        Self {
            speech,
            store,
            language: DEFAULT_SPEECH_LANGUAGE.to_string(),
        }
    }

    /// Use a different language code
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Transcribe an uploaded recording
    ///
    /// The upload is written to a fresh `.wav` scratch file that is deleted
    /// again whatever happens next.
    #[instrument(skip(self, audio), fields(bytes = audio.len()))]
    pub async fn transcribe_upload(
        &self,
        audio: &[u8],
    ) -> Result<TranscriptionResult, ApplicationError> {
        if audio.is_empty() {
            return Err(ApplicationError::InvalidOperation(
                "audio upload is empty".to_string(),
            ));
        }

        let name = ScratchFileName::generate(AudioFormat::Wav);
        let guard = ScratchGuard::new(Arc::clone(&self.store), name);
        self.store.write(guard.name(), audio).await?;

        let result = self
            .speech
            .transcribe_file(&guard.path(), &self.language)
            .await?;

        debug!(chars = result.text.chars().count(), "Upload transcribed");
        Ok(result)
    }

    /// Synthesize `text` and keep the audio in the scratch store
    ///
    /// Returns the generated file name for later retrieval.
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn synthesize_to_scratch(
        &self,
        text: &str,
    ) -> Result<ScratchFileName, ApplicationError> {
        if text.trim().is_empty() {
            return Err(ApplicationError::InvalidOperation(
                "no text provided".to_string(),
            ));
        }

        let synthesis = self.speech.synthesize(text, &self.language).await?;
        let name = ScratchFileName::generate(synthesis.format);
        self.store.write(&name, &synthesis.audio_data).await?;

        debug!(file = %name, bytes = synthesis.audio_data.len(), "Speech stored");
        Ok(name)
    }

    /// Load a previously stored file by its client-supplied name
    ///
    /// Names that are not a single safe path segment are reported as
    /// missing, the same as files that do not exist.
    #[instrument(skip(self))]
    pub async fn open_audio(
        &self,
        file_name: &str,
    ) -> Result<(ScratchFileName, Bytes), ApplicationError> {
        let not_found = || ApplicationError::NotFound(format!("audio file {file_name}"));

        let name = ScratchFileName::parse(file_name).map_err(|_| not_found())?;
        let data = self.store.read(&name).await?.ok_or_else(not_found)?;
        Ok((name, data))
    }

    /// Delete synthesized files older than `retention`
    #[instrument(skip(self))]
    pub async fn sweep_expired(&self, retention: Duration) -> Result<usize, ApplicationError> {
        let removed = self
            .store
            .sweep_older_than(retention, Some(AudioFormat::Mp3))
            .await?;
        if removed > 0 {
            info!(removed, "Evicted expired audio files");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use super::*;
    use crate::ports::{MockAudioStorePort, MockSpeechPort, SynthesisResult};

    fn scratch_path(name: &ScratchFileName) -> PathBuf {
        PathBuf::from("/scratch").join(name.as_str())
    }

    /// Store mock that accepts writes and records discards
    fn recording_store(discarded: Arc<Mutex<Vec<ScratchFileName>>>) -> MockAudioStorePort {
        let mut store = MockAudioStorePort::new();
        store.expect_path_of().returning(scratch_path);
        store.expect_write().returning(|_, _| Ok(()));
        store
            .expect_discard()
            .returning(move |n| discarded.lock().unwrap().push(n.clone()));
        store
    }

    fn is_scratch_wav(path: &Path) -> bool {
        path.starts_with("/scratch") && path.extension().is_some_and(|e| e == "wav")
    }

    #[tokio::test]
    async fn transcription_deletes_upload_on_success() {
        let discarded = Arc::new(Mutex::new(Vec::new()));
        let store = recording_store(Arc::clone(&discarded));

        let mut speech = MockSpeechPort::new();
        speech
            .expect_transcribe_file()
            .withf(|path, lang| is_scratch_wav(path) && lang == "es")
            .times(1)
            .returning(|_, lang| {
                Ok(TranscriptionResult {
                    text: "Hola".to_string(),
                    language: Some(lang.to_string()),
                })
            });

        let service = SpeechService::new(Arc::new(speech), Arc::new(store));
        let result = service.transcribe_upload(b"RIFF").await.unwrap();

        assert_eq!(result.text, "Hola");
        let discarded = discarded.lock().unwrap();
        assert_eq!(discarded.len(), 1);
        assert_eq!(discarded[0].format(), Some(AudioFormat::Wav));
    }

    #[tokio::test]
    async fn transcription_deletes_upload_on_failure() {
        let discarded = Arc::new(Mutex::new(Vec::new()));
        let store = recording_store(Arc::clone(&discarded));

        let mut speech = MockSpeechPort::new();
        speech
            .expect_transcribe_file()
            .returning(|_, _| Err(ApplicationError::ExternalService("whisper crashed".to_string())));

        let service = SpeechService::new(Arc::new(speech), Arc::new(store));
        let result = service.transcribe_upload(b"RIFF").await;

        assert!(matches!(result, Err(ApplicationError::ExternalService(_))));
        assert_eq!(discarded.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn transcription_deletes_upload_when_write_fails() {
        let discarded = Arc::new(Mutex::new(Vec::new()));
        let discarded_clone = Arc::clone(&discarded);

        let mut store = MockAudioStorePort::new();
        store
            .expect_write()
            .returning(|_, _| Err(ApplicationError::Internal("disk full".to_string())));
        store
            .expect_discard()
            .returning(move |n| discarded_clone.lock().unwrap().push(n.clone()));

        let mut speech = MockSpeechPort::new();
        speech.expect_transcribe_file().never();

        let service = SpeechService::new(Arc::new(speech), Arc::new(store));
        assert!(service.transcribe_upload(b"RIFF").await.is_err());
        assert_eq!(discarded.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_upload_is_rejected() {
        let service = SpeechService::new(
            Arc::new(MockSpeechPort::new()),
            Arc::new(MockAudioStorePort::new()),
        );
        let result = service.transcribe_upload(b"").await;
        assert!(matches!(result, Err(ApplicationError::InvalidOperation(_))));
    }

    #[tokio::test]
    async fn synthesis_stores_mp3_under_fresh_names() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let written_clone = Arc::clone(&written);

        let mut store = MockAudioStorePort::new();
        store.expect_write().returning(move |n, data| {
            assert_eq!(data, b"ID3");
            written_clone.lock().unwrap().push(n.clone());
            Ok(())
        });

        let mut speech = MockSpeechPort::new();
        speech
            .expect_synthesize()
            .withf(|text, lang| text == "Hola" && lang == "es")
            .returning(|_, _| {
                Ok(SynthesisResult {
                    audio_data: Bytes::from_static(b"ID3"),
                    format: AudioFormat::Mp3,
                })
            });

        let service = SpeechService::new(Arc::new(speech), Arc::new(store));
        let (a, b) = tokio::join!(
            service.synthesize_to_scratch("Hola"),
            service.synthesize_to_scratch("Hola")
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_ne!(a, b);
        assert_eq!(a.format(), Some(AudioFormat::Mp3));
        assert_eq!(*written.lock().unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn blank_text_is_rejected_without_synthesis() {
        let mut speech = MockSpeechPort::new();
        speech.expect_synthesize().never();

        let service = SpeechService::new(Arc::new(speech), Arc::new(MockAudioStorePort::new()));
        let result = service.synthesize_to_scratch("  \n").await;

        assert!(matches!(result, Err(ApplicationError::InvalidOperation(_))));
    }

    #[tokio::test]
    async fn synthesis_failure_writes_nothing() {
        let mut speech = MockSpeechPort::new();
        speech
            .expect_synthesize()
            .returning(|_, _| Err(ApplicationError::ExternalService("Status 503".to_string())));
        let mut store = MockAudioStorePort::new();
        store.expect_write().never();

        let service = SpeechService::new(Arc::new(speech), Arc::new(store));
        assert!(service.synthesize_to_scratch("Hola").await.is_err());
    }

    #[tokio::test]
    async fn open_audio_returns_stored_bytes() {
        let mut store = MockAudioStorePort::new();
        store
            .expect_read()
            .returning(|_| Ok(Some(Bytes::from_static(b"ID3"))));

        let service = SpeechService::new(Arc::new(MockSpeechPort::new()), Arc::new(store));
        let (name, data) = service.open_audio("abc.mp3").await.unwrap();

        assert_eq!(name.as_str(), "abc.mp3");
        assert_eq!(&data[..], b"ID3");
    }

    #[tokio::test]
    async fn open_audio_missing_or_invalid_is_not_found() {
        let mut store = MockAudioStorePort::new();
        store.expect_read().returning(|_| Ok(None));

        let service = SpeechService::new(Arc::new(MockSpeechPort::new()), Arc::new(store));

        assert!(matches!(
            service.open_audio("nope.mp3").await,
            Err(ApplicationError::NotFound(_))
        ));
        assert!(matches!(
            service.open_audio("../etc/passwd").await,
            Err(ApplicationError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn sweep_targets_mp3_files() {
        let mut store = MockAudioStorePort::new();
        store
            .expect_sweep_older_than()
            .withf(|age, format| *age == Duration::from_secs(3600) && *format == Some(AudioFormat::Mp3))
            .returning(|_, _| Ok(3));

        let service = SpeechService::new(Arc::new(MockSpeechPort::new()), Arc::new(store));
        assert_eq!(service.sweep_expired(Duration::from_secs(3600)).await.unwrap(), 3);
    }
}
