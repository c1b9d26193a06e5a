//! AI Core - Chat completion client
//!
//! Provides the inference abstraction used by the tutor and an
//! implementation backed by the OpenRouter chat completions API
//! (OpenAI-compatible).

pub mod config;
pub mod error;
pub mod openrouter;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use openrouter::OpenRouterInferenceEngine;
pub use ports::{InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage};
