//! AI Speech - Speech-to-Text and Text-to-Speech providers
//!
//! Provides traits and implementations for speech processing:
//! - `SpeechToText` - Transcribe an audio file to text (STT)
//! - `TextToSpeech` - Synthesize speech from text (TTS)
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports)
//! - `providers` module contains concrete implementations (adapters)
//!
//! # Supported Providers
//!
//! - whisper.cpp CLI (local STT), fed through ffmpeg
//! - Google Translate TTS endpoint (MP3 output)
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{GoogleTtsProvider, TextToSpeech, WhisperCppProvider, SpeechToText};
//!
//! let stt = WhisperCppProvider::new(config.stt)?;
//! let transcription = stt.transcribe_file(&path, "es").await?;
//!
//! let tts = GoogleTtsProvider::new(config.tts)?;
//! let audio = tts.synthesize("¡Hola!", "es").await?;
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::{GoogleTtsConfig, LocalSttConfig, SpeechConfig};
pub use converter::AudioConverter;
pub use error::SpeechError;
pub use ports::{SpeechToText, TextToSpeech};
pub use providers::{GoogleTtsProvider, WhisperCppProvider};
pub use types::{AudioData, Transcription};
