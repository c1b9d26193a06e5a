//! Configuration for speech processing

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for speech processing services
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Local speech-to-text
    #[serde(default)]
    pub stt: LocalSttConfig,

    /// Text-to-speech
    #[serde(default)]
    pub tts: GoogleTtsConfig,
}

impl SpeechConfig {
    /// Validate both sections
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        self.stt.validate()?;
        self.tts.validate()
    }
}

/// whisper.cpp configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalSttConfig {
    /// whisper.cpp CLI executable (path or name on PATH)
    #[serde(default = "default_whisper_executable")]
    pub executable_path: PathBuf,

    /// GGML model file
    #[serde(default = "default_whisper_model")]
    pub model_path: PathBuf,

    /// Number of CPU threads handed to whisper.cpp
    #[serde(default = "default_threads")]
    pub threads: u32,

    /// Language hint used when the caller passes none
    #[serde(default = "default_language")]
    pub default_language: String,

    /// ffmpeg executable used to normalize uploads to 16 kHz mono WAV
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg_path: String,

    /// Whether to run uploads through ffmpeg before transcription
    #[serde(default = "default_true")]
    pub normalize_audio: bool,
}

fn default_whisper_executable() -> PathBuf {
    PathBuf::from("whisper-cli")
}

fn default_whisper_model() -> PathBuf {
    PathBuf::from("models/ggml-base.bin")
}

const fn default_threads() -> u32 {
    4
}

fn default_language() -> String {
    "es".to_string()
}

fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for LocalSttConfig {
    fn default() -> Self {
        Self {
            executable_path: default_whisper_executable(),
            model_path: default_whisper_model(),
            threads: default_threads(),
            default_language: default_language(),
            ffmpeg_path: default_ffmpeg(),
            normalize_audio: true,
        }
    }
}

impl LocalSttConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.executable_path.as_os_str().is_empty() {
            return Err("speech.stt.executable_path must not be empty".to_string());
        }
        if self.model_path.as_os_str().is_empty() {
            return Err("speech.stt.model_path must not be empty".to_string());
        }
        if self.threads == 0 {
            return Err("speech.stt.threads must be greater than 0".to_string());
        }
        if self.normalize_audio && self.ffmpeg_path.trim().is_empty() {
            return Err("speech.stt.ffmpeg_path must be set when normalize_audio is on".to_string());
        }
        Ok(())
    }
}

/// Google Translate TTS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleTtsConfig {
    /// Top-level domain of the Google Translate host (`translate.google.<tld>`)
    #[serde(default = "default_tld")]
    pub tld: String,

    /// Full base URL, overriding `tld` (used for proxies and tests)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Language used when the caller passes none
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Speak slowly
    #[serde(default)]
    pub slow: bool,

    /// Request timeout in milliseconds, per chunk
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_tld() -> String {
    "com".to_string()
}

const fn default_timeout_ms() -> u64 {
    30000
}

impl Default for GoogleTtsConfig {
    fn default() -> Self {
        Self {
            tld: default_tld(),
            base_url: None,
            default_language: default_language(),
            slow: false,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl GoogleTtsConfig {
    /// Base URL requests are sent to
    #[must_use]
    pub fn endpoint_base(&self) -> String {
        self.base_url.as_deref().map_or_else(
            || format!("https://translate.google.{}", self.tld),
            |url| url.trim_end_matches('/').to_string(),
        )
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_none() && self.tld.trim().is_empty() {
            return Err("speech.tts.tld must not be empty".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("speech.tts.timeout_ms must be greater than 0".to_string());
        }
        Ok(())
    }
}
