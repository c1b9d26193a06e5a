//! Audio format converter for speech processing
//!
//! Browsers record WebM/Opus or OGG no matter what the upload is called,
//! while whisper.cpp only reads 16 kHz mono PCM WAV. The converter shells out
//! to FFmpeg to bridge the two.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, instrument};

use crate::error::SpeechError;

/// Sample rate whisper.cpp expects
pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Audio converter for transforming between audio formats
///
/// Uses FFmpeg for audio conversion. FFmpeg must be installed on the system.
#[derive(Debug, Clone, Default)]
pub struct AudioConverter {
    /// FFmpeg binary path (defaults to "ffmpeg" in PATH)
    ffmpeg_path: Option<String>,
}

impl AudioConverter {
    /// Create a new audio converter with default settings
    #[must_use]
    pub const fn new() -> Self {
        Self { ffmpeg_path: None }
    }

    /// Create a new audio converter with a custom FFmpeg path
    #[must_use]
    pub fn with_ffmpeg_path(path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: Some(path.into()),
        }
    }

    /// Get the FFmpeg binary path
    fn ffmpeg_path(&self) -> &str {
        self.ffmpeg_path.as_deref().unwrap_or("ffmpeg")
    }

    /// Check if FFmpeg is available on the system
    #[instrument(skip(self))]
    pub async fn is_available(&self) -> bool {
        Command::new(self.ffmpeg_path())
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok_and(|status| status.success())
    }

    /// Arguments that re-encode `input` as 16-bit 16 kHz mono WAV at `output`
    fn whisper_wav_args(input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            "-nostdin".into(),
            "-y".into(),
            "-loglevel".into(),
            "error".into(),
            "-i".into(),
            input.as_os_str().to_owned(),
            "-ar".into(),
            WHISPER_SAMPLE_RATE.to_string().into(),
            "-ac".into(),
            "1".into(),
            "-codec:a".into(),
            "pcm_s16le".into(),
            "-f".into(),
            "wav".into(),
            output.as_os_str().to_owned(),
        ]
    }

    /// Convert any FFmpeg-readable audio file into a whisper.cpp input file
    ///
    /// # Errors
    ///
    /// Returns an error if FFmpeg is missing, fails, or writes nothing.
    #[instrument(skip(self), fields(input = %input.display()))]
    pub async fn to_whisper_wav(&self, input: &Path, output: &Path) -> Result<(), SpeechError> {
        let result = Command::new(self.ffmpeg_path())
            .args(Self::whisper_wav_args(input, output))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SpeechError::NotAvailable(format!(
                        "ffmpeg not found at '{}'",
                        self.ffmpeg_path()
                    ))
                } else {
                    SpeechError::AudioProcessing(format!("Failed to spawn FFmpeg: {e}"))
                }
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(SpeechError::InvalidAudio(format!(
                "FFmpeg conversion failed: {}",
                stderr.trim()
            )));
        }

        let size = tokio::fs::metadata(output)
            .await
            .map(|m| m.len())
            .unwrap_or(0);
        if size == 0 {
            return Err(SpeechError::AudioProcessing(
                "FFmpeg produced empty output".to_string(),
            ));
        }

        debug!(output_bytes = size, "Conversion successful");
        Ok(())
    }
}
