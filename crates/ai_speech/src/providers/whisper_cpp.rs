//! Whisper.cpp Local Speech-to-Text Provider
//!
//! Implements `SpeechToText` using the whisper.cpp CLI for local transcription.
//!
//! # Prerequisites
//!
//! - whisper.cpp built with its `whisper-cli` binary available
//! - A GGML model file (e.g., ggml-base.bin)
//! - ffmpeg, unless `normalize_audio` is turned off
//!
//! ```bash
//! git clone https://github.com/ggerganov/whisper.cpp
//! cd whisper.cpp && cmake -B build && cmake --build build -j
//! ./models/download-ggml-model.sh base
//! ```

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, error, instrument, warn};

use crate::config::LocalSttConfig;
use crate::converter::AudioConverter;
use crate::error::SpeechError;
use crate::ports::SpeechToText;
use crate::types::Transcription;

/// Stem of the transcript file whisper.cpp writes into the work directory
const TRANSCRIPT_STEM: &str = "transcript";

/// Local STT provider using whisper.cpp
#[derive(Debug, Clone)]
pub struct WhisperCppProvider {
    config: LocalSttConfig,
    converter: AudioConverter,
}

impl WhisperCppProvider {
    /// Create a new whisper.cpp provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: LocalSttConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;
        let converter = AudioConverter::with_ffmpeg_path(config.ffmpeg_path.clone());
        Ok(Self { config, converter })
    }

    /// Get the whisper.cpp executable path
    fn executable(&self) -> &Path {
        &self.config.executable_path
    }

    /// Get the model path
    fn model(&self) -> &Path {
        &self.config.model_path
    }

    /// Run whisper.cpp on a WAV file, writing `<output_base>.txt`
    #[instrument(skip(self, audio_path, output_base), fields(model = %self.model().display()))]
    async fn run_whisper(
        &self,
        audio_path: &Path,
        output_base: &Path,
        language: &str,
    ) -> Result<String, SpeechError> {
        let mut cmd = Command::new(self.executable());

        cmd.arg("-m")
            .arg(self.model())
            .arg("-f")
            .arg(audio_path)
            .arg("-l")
            .arg(language)
            .arg("--output-txt")
            .arg("--no-timestamps")
            .arg("-t")
            .arg(self.config.threads.to_string())
            .arg("-of")
            .arg(output_base)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(?cmd, "Running whisper.cpp");

        let output = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SpeechError::NotAvailable(format!(
                    "whisper.cpp not found at '{}'",
                    self.executable().display()
                ))
            } else {
                SpeechError::TranscriptionFailed(format!("Failed to run whisper.cpp: {e}"))
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!(stderr = %stderr.trim(), "whisper.cpp failed");
            return Err(SpeechError::TranscriptionFailed(format!(
                "whisper.cpp exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let txt_path = output_base.with_extension("txt");
        let text = tokio::fs::read_to_string(&txt_path).await.map_err(|e| {
            SpeechError::TranscriptionFailed(format!("Failed to read transcription output: {e}"))
        })?;

        Ok(normalize_transcript(&text))
    }

    /// Make the input whisper.cpp will read, converting it when configured
    async fn prepare_input(&self, path: &Path, workdir: &TempDir) -> Result<PathBuf, SpeechError> {
        if !self.config.normalize_audio {
            return Ok(path.to_path_buf());
        }
        let wav = workdir.path().join("input.wav");
        self.converter.to_whisper_wav(path, &wav).await?;
        Ok(wav)
    }
}

/// Collapse the line-per-segment transcript into a single line
fn normalize_transcript(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl SpeechToText for WhisperCppProvider {
    #[instrument(skip(self, path), fields(path = %path.display()))]
    async fn transcribe_file(
        &self,
        path: &Path,
        language: &str,
    ) -> Result<Transcription, SpeechError> {
        let size = tokio::fs::metadata(path)
            .await
            .map_err(|e| SpeechError::InvalidAudio(format!("Cannot read audio file: {e}")))?
            .len();
        if size == 0 {
            return Err(SpeechError::InvalidAudio("audio file is empty".to_string()));
        }

        let language = if language.trim().is_empty() {
            self.config.default_language.as_str()
        } else {
            language
        };

        // Conversion output and transcript live here; removed on drop
        let workdir = tempfile::tempdir().map_err(|e| {
            SpeechError::TranscriptionFailed(format!("Failed to create work directory: {e}"))
        })?;

        let input = self.prepare_input(path, &workdir).await?;
        let text = self
            .run_whisper(&input, &workdir.path().join(TRANSCRIPT_STEM), language)
            .await?;

        if text.is_empty() {
            warn!("whisper.cpp returned empty transcription");
        }

        debug!(chars = text.chars().count(), "Transcription finished");
        Ok(Transcription::new(text).with_language(language))
    }

    async fn is_available(&self) -> bool {
        let executable_exists = self.executable().exists() || {
            // Try to find in PATH
            Command::new(self.executable())
                .arg("--help")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await
                .is_ok_and(|s| s.success())
        };

        let model_exists = self.model().exists();
        let converter_ready = !self.config.normalize_audio || self.converter.is_available().await;

        debug!(
            executable = executable_exists,
            model = model_exists,
            ffmpeg = converter_ready,
            "whisper.cpp availability"
        );

        executable_exists && model_exists && converter_ready
    }

    fn model_name(&self) -> &str {
        self.model()
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("whisper.cpp")
    }
}
