//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `scratch`: scratch directory and retention
//! - `tutor`: conversation defaults
//!
//! The `inference` and `speech` sections reuse the provider crates' own
//! config types.

mod scratch;
mod server;
mod tutor;

use ai_core::InferenceConfig;
use ai_speech::SpeechConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use scratch::ScratchConfig;
pub use server::ServerConfig;
pub use tutor::TutorConfig;

/// Environment variable prefix, e.g. `HABLAMOS_SERVER__PORT`
pub const ENV_PREFIX: &str = "HABLAMOS";

/// Nested key separator for environment variables
pub const ENV_SEPARATOR: &str = "__";

/// Fallback variable for the completion API key
pub const API_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Completion API configuration
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Speech recognition and synthesis configuration
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Scratch directory configuration
    #[serde(default)]
    pub scratch: ScratchConfig,

    /// Tutor defaults
    #[serde(default)]
    pub tutor: TutorConfig,
}

impl AppConfig {
    /// Load configuration from `.env`, an optional `config.toml` and the
    /// environment
    pub fn load() -> Result<Self, config::ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env file");
        }

        let builder = Self::builder()?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., HABLAMOS_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins"),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_api_key_fallback(std::env::var(API_KEY_ENV_VAR).ok());
        Ok(config)
    }

    /// Parse configuration from TOML text on top of the defaults
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        Self::builder()?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError>
    {
        config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("scratch.directory", "temp")
    }

    /// Use `value` as the API key when none was configured
    ///
    /// Blank values are ignored.
    pub fn apply_api_key_fallback(&mut self, value: Option<String>) {
        if self.inference.api_key.is_some() {
            return;
        }
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            self.inference.api_key = Some(SecretString::from(key));
            debug!("Using {API_KEY_ENV_VAR} for the completion API key");
        }
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.inference.validate()?;
        self.speech.validate()?;
        self.scratch.validate()?;
        self.tutor.validate()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.scratch.directory, PathBuf::from("temp"));
        assert_eq!(config.tutor.default_max_words, 50);
        assert_eq!(config.inference.max_tokens, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [server]
            port = 8080
            log_format = "json"

            [inference]
            default_model = "meta-llama/llama-3.3-8b-instruct:free"

            [speech.stt]
            threads = 2

            [scratch]
            retention_secs = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert!(config.server.json_logs());
        assert_eq!(
            config.inference.default_model,
            "meta-llama/llama-3.3-8b-instruct:free"
        );
        assert_eq!(config.speech.stt.threads, 2);
        assert_eq!(config.scratch.retention(), None);
    }

    #[test]
    fn api_key_fallback_fills_missing_key() {
        let mut config = AppConfig::default();
        config.apply_api_key_fallback(Some("sk-or-test".to_string()));
        assert_eq!(
            config.inference.api_key.as_ref().map(|k| k.expose_secret()),
            Some("sk-or-test")
        );
    }

    #[test]
    fn api_key_fallback_does_not_override_configured_key() {
        let mut config = AppConfig::from_toml_str(
            r#"
            [inference]
            api_key = "from-file"
            "#,
        )
        .unwrap();
        config.apply_api_key_fallback(Some("from-env".to_string()));
        assert_eq!(
            config.inference.api_key.as_ref().map(|k| k.expose_secret()),
            Some("from-file")
        );
    }

    #[test]
    fn blank_fallback_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_api_key_fallback(Some("   ".to_string()));
        assert!(config.inference.api_key.is_none());
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let mut config = AppConfig::default();
        config.apply_api_key_fallback(Some("sk-or-secret".to_string()));
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-or-secret"));
    }

    #[test]
    fn invalid_section_fails_validation() {
        let config = AppConfig::from_toml_str(
            r#"
            [tutor]
            default_max_words = 0
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
