//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the OpenRouter
//! completion client, whisper.cpp and Google TTS speech, and the local
//! scratch directory. Also owns configuration loading and the landing
//! page templates.

pub mod adapters;
pub mod config;
pub mod templates;

pub use adapters::*;
pub use config::{AppConfig, ScratchConfig, ServerConfig, TutorConfig};
pub use templates::{LandingPage, TemplateEngine, TemplateError};
