//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod local_audio_store;
mod openrouter_inference_adapter;
mod speech_adapter;

pub use local_audio_store::LocalAudioStore;
pub use openrouter_inference_adapter::OpenRouterInferenceAdapter;
pub use speech_adapter::SpeechAdapter;
