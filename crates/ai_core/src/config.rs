//! Configuration for the chat completion client

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration for the inference engine
#[derive(Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the OpenAI-compatible API (without `/chat/completions`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Completion token cap
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature; the provider default applies when unset
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Optional `HTTP-Referer` attribution header
    #[serde(default)]
    pub http_referer: Option<String>,

    /// Optional `X-Title` attribution header
    #[serde(default)]
    pub app_title: Option<String>,
}

impl std::fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("default_model", &self.default_model)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("http_referer", &self.http_referer)
            .field("app_title", &self.app_title)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_model() -> String {
    "deepseek/deepseek-chat-v3.1:free".to_string()
}

const fn default_timeout_ms() -> u64 {
    60000 // 60 seconds
}

const fn default_max_tokens() -> u32 {
    100
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            default_model: default_model(),
            timeout_ms: default_timeout_ms(),
            max_tokens: default_max_tokens(),
            temperature: None,
            http_referer: None,
            app_title: None,
        }
    }
}

impl InferenceConfig {
    /// Get the API key as a string slice
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Whether a non-empty API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some_and(|k| !k.trim().is_empty())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!("inference.base_url must be an http(s) URL: {}", self.base_url));
        }
        if self.default_model.trim().is_empty() {
            return Err("inference.default_model must not be empty".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("inference.timeout_ms must be greater than zero".to_string());
        }
        if self.max_tokens == 0 {
            return Err("inference.max_tokens must be greater than zero".to_string());
        }
        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(format!("inference.temperature must be within 0.0..=2.0, got {t}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_openrouter() {
        let config = InferenceConfig::default();
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.default_model, "deepseek/deepseek-chat-v3.1:free");
        assert_eq!(config.timeout_ms, 60000);
        assert_eq!(config.max_tokens, 100);
        assert!(config.temperature.is_none());
        assert!(!config.has_api_key());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = InferenceConfig {
            api_key: Some(SecretString::from("sk-or-very-secret")),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("very-secret"));
    }

    #[test]
    fn api_key_is_not_serialized() {
        let config = InferenceConfig {
            api_key: Some(SecretString::from("sk-or-very-secret")),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("very-secret"));
        assert!(!json.contains("api_key"));
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: InferenceConfig =
            serde_json::from_str(r#"{"api_key":"sk-test","max_tokens":50}"#).unwrap();
        assert_eq!(config.api_key(), Some("sk-test"));
        assert_eq!(config.max_tokens, 50);
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
    }

    #[test]
    fn blank_key_is_not_configured() {
        let config = InferenceConfig {
            api_key: Some(SecretString::from("   ")),
            ..Default::default()
        };
        assert!(!config.has_api_key());
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(InferenceConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let bad_url = InferenceConfig {
            base_url: "openrouter.ai".to_string(),
            ..Default::default()
        };
        assert!(bad_url.validate().is_err());

        let zero_tokens = InferenceConfig {
            max_tokens: 0,
            ..Default::default()
        };
        assert!(zero_tokens.validate().is_err());

        let hot = InferenceConfig {
            temperature: Some(3.5),
            ..Default::default()
        };
        assert!(hot.validate().is_err());
    }
}
