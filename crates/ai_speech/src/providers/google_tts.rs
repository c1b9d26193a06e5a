//! Google Translate Text-to-Speech Provider
//!
//! Uses the public `translate_tts` endpoint (the one gTTS talks to). It
//! returns MP3 and accepts at most [`MAX_CHUNK_CHARS`] characters per request,
//! so longer text is split and the MP3 segments are concatenated in order.

use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use domain::AudioFormat;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, instrument, warn};

use crate::config::GoogleTtsConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::AudioData;

/// Longest text the endpoint accepts in one request
pub const MAX_CHUNK_CHARS: usize = 100;

/// Characters that end a chunk-friendly clause
const CLAUSE_ENDINGS: &[char] = &[
    '.', '?', '!', ',', ';', ':', '…', '\n', '。', '，', '؟', '،',
];

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0 Safari/537.36";

/// TTS provider backed by Google Translate
#[derive(Debug, Clone)]
pub struct GoogleTtsProvider {
    client: Client,
    config: GoogleTtsConfig,
}

impl GoogleTtsProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid
    /// or the HTTP client cannot be built.
    pub fn new(config: GoogleTtsConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SpeechError::Configuration(e.to_string()))?;

        info!(endpoint = %config.endpoint_base(), "Initialized Google TTS provider");

        Ok(Self { client, config })
    }

    fn speed(&self) -> &'static str {
        if self.config.slow { "0.3" } else { "1" }
    }

    /// Fetch the MP3 for one chunk
    #[instrument(skip(self, chunk), fields(chars = chunk.chars().count()))]
    async fn fetch_chunk(
        &self,
        chunk: &str,
        language: &str,
        idx: usize,
        total: usize,
    ) -> Result<Bytes, SpeechError> {
        let url = format!("{}/translate_tts", self.config.endpoint_base());
        let idx_s = idx.to_string();
        let total_s = total.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(url)
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", language),
                ("total", total_s.as_str()),
                ("idx", idx_s.as_str()),
                ("textlen", textlen.as_str()),
                ("client", "tw-ob"),
                ("ttsspeed", self.speed()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SpeechError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "TTS request failed");
            return Err(SpeechError::SynthesisFailed(format!(
                "Status {status} for chunk {idx}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(SpeechError::SynthesisFailed(format!(
                "empty audio for chunk {idx}"
            )));
        }
        Ok(bytes)
    }
}

#[async_trait]
impl TextToSpeech for GoogleTtsProvider {
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn synthesize(&self, text: &str, language: &str) -> Result<AudioData, SpeechError> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SpeechError::InvalidInput("no speakable text".to_string()));
        }

        let language = if language.trim().is_empty() {
            self.config.default_language.as_str()
        } else {
            language
        };

        debug!(chunks = chunks.len(), "Synthesizing speech");

        let total = chunks.len();
        let mut audio = BytesMut::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let segment = self.fetch_chunk(chunk, language, idx, total).await?;
            audio.extend_from_slice(&segment);
        }

        Ok(AudioData::new(audio.freeze(), AudioFormat::Mp3))
    }

    fn provider_name(&self) -> &str {
        "google-translate"
    }
}

/// Split `text` into request-sized chunks
///
/// Clauses are cut at punctuation first, then at whitespace, then at hard
/// character boundaries. Neighbouring clauses are packed together while they
/// fit. Chunks without any letter or digit are dropped.
pub(crate) fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for clause in clauses(text) {
        for piece in fit_clause(clause, max_chars) {
            let piece_len = piece.chars().count();
            if current_len == 0 {
                current = piece;
                current_len = piece_len;
            } else if current_len + 1 + piece_len <= max_chars {
                current.push(' ');
                current.push_str(&piece);
                current_len += 1 + piece_len;
            } else {
                chunks.push(std::mem::take(&mut current));
                current = piece;
                current_len = piece_len;
            }
        }
    }
    if current_len > 0 {
        chunks.push(current);
    }

    chunks.retain(|c| c.chars().any(char::is_alphanumeric));
    chunks
}

/// Trimmed clauses, each keeping its closing punctuation
fn clauses(text: &str) -> Vec<&str> {
    text.split_inclusive(CLAUSE_ENDINGS)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect()
}

/// Break one clause into pieces of at most `max_chars` characters
fn fit_clause(clause: &str, max_chars: usize) -> Vec<String> {
    if clause.chars().count() <= max_chars {
        return vec![clause.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in clause.split_whitespace() {
        let word_len = word.chars().count();
        if word_len > max_chars {
            if current_len > 0 {
                pieces.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            pieces.extend(chars.chunks(max_chars).map(|c| c.iter().collect::<String>()));
            continue;
        }
        if current_len == 0 {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            pieces.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if current_len > 0 {
        pieces.push(current);
    }
    pieces
}
