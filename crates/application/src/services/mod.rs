//! Application services - Use case implementations

mod health_service;
mod speech_service;
mod tutor_service;

pub use health_service::{HealthReport, HealthService, ServiceHealth};
pub use speech_service::{DEFAULT_SPEECH_LANGUAGE, SpeechService};
pub use tutor_service::{TutorOptions, TutorService};
