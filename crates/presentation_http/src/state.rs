//! Application state shared across handlers

use std::sync::Arc;

use application::{HealthService, SpeechService, TutorService};
use infrastructure::{AppConfig, TemplateEngine};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Level-aware replies and translation
    pub tutor_service: Arc<TutorService>,
    /// Transcription, synthesis and scratch file access
    pub speech_service: Arc<SpeechService>,
    /// Readiness checks
    pub health_service: Arc<HealthService>,
    /// Landing page templates
    pub templates: TemplateEngine,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
