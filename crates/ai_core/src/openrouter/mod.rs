//! OpenRouter chat completions integration

mod client;

pub use client::OpenRouterInferenceEngine;
