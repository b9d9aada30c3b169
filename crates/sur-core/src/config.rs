//! Configuration models.
//!
//! - `RootConfig`: user preferences in `config.toml`
//! - `SecretConfig`: API credentials in `secret.json`
//!
//! Loading and saving live in the infrastructure crate.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::generation::SamplingConfig;

/// Default Gemini model.
pub const DEFAULT_MODEL_NAME: &str = "gemini-2.5-flash";

/// Default request timeout for one generation, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

/// Environment variables that override the stored API key, in priority order.
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootConfig {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// `[generation]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub model_name: String,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let sampling = SamplingConfig::default();
        Self {
            model_name: DEFAULT_MODEL_NAME.to_string(),
            temperature: sampling.temperature,
            top_k: sampling.top_k,
            top_p: sampling.top_p,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GenerationConfig {
    pub fn sampling(&self) -> SamplingConfig {
        SamplingConfig {
            temperature: self.temperature,
            top_k: self.top_k,
            top_p: self.top_p,
        }
    }
}

/// `[export]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory exported lyrics are written to. Current directory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

/// Root of `secret.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

impl SecretConfig {
    /// Applies the first non-empty API key found through `lookup`.
    ///
    /// `lookup` is called with each name in [`API_KEY_ENV_VARS`].
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_key = API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty());

        if let Some(api_key) = env_key {
            match self.gemini.as_mut() {
                Some(gemini) => gemini.api_key = api_key,
                None => {
                    self.gemini = Some(GeminiConfig {
                        api_key,
                        model_name: None,
                    })
                }
            }
        }
        self
    }

    /// The Gemini API key, if one is set and non-empty.
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini
            .as_ref()
            .map(|g| g.api_key.trim())
            .filter(|key| !key.is_empty())
    }

    /// Model name from the secret file, falling back to `configured`.
    pub fn gemini_model_name<'a>(&'a self, configured: &'a str) -> &'a str {
        self.gemini
            .as_ref()
            .and_then(|g| g.model_name.as_deref())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(configured)
    }
}

/// Service for loading secret configuration.
///
/// Implementations must never log or echo the secrets they load.
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration, with environment overrides applied.
    async fn load_secrets(&self) -> crate::error::Result<SecretConfig>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_config_defaults_from_empty_toml() {
        let config: RootConfig = toml::from_str("").unwrap();
        assert_eq!(config, RootConfig::default());
        assert_eq!(config.generation.model_name, DEFAULT_MODEL_NAME);
        assert_eq!(config.generation.timeout_secs, 180);
        assert_eq!(config.generation.sampling(), SamplingConfig::default());
        assert!(config.export.directory.is_none());
    }

    #[test]
    fn test_partial_generation_section() {
        let config: RootConfig = toml::from_str(
            r#"
            [generation]
            temperature = 0.3

            [export]
            directory = "/tmp/lyrics"
            "#,
        )
        .unwrap();

        assert!((config.generation.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.generation.top_k, 40);
        assert_eq!(
            config.export.directory,
            Some(PathBuf::from("/tmp/lyrics"))
        );
    }

    #[test]
    fn test_secret_json_shape() {
        let secret: SecretConfig =
            serde_json::from_str(r#"{"gemini": {"api_key": "abc"}}"#).unwrap();
        assert_eq!(secret.gemini_api_key(), Some("abc"));
        assert_eq!(secret.gemini_model_name("fallback"), "fallback");
    }

    #[test]
    fn test_env_override_priority() {
        let lookup = |name: &str| match name {
            "GEMINI_API_KEY" => Some("from-gemini".to_string()),
            "API_KEY" => Some("from-api".to_string()),
            _ => None,
        };
        let secret = SecretConfig::default().with_env_overrides(lookup);
        assert_eq!(secret.gemini_api_key(), Some("from-gemini"));
    }

    #[test]
    fn test_env_override_skips_blank_values() {
        let lookup = |name: &str| match name {
            "GEMINI_API_KEY" => Some("  ".to_string()),
            "API_KEY" => Some("from-api".to_string()),
            _ => None,
        };
        let secret = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: "stored".to_string(),
                model_name: Some("gemini-pro".to_string()),
            }),
        }
        .with_env_overrides(lookup);

        assert_eq!(secret.gemini_api_key(), Some("from-api"));
        assert_eq!(secret.gemini_model_name("fallback"), "gemini-pro");
    }

    #[test]
    fn test_blank_key_is_missing() {
        let secret = SecretConfig {
            gemini: Some(GeminiConfig::default()),
        };
        assert_eq!(secret.gemini_api_key(), None);
        assert_eq!(
            SecretConfig::default().with_env_overrides(|_| None),
            SecretConfig::default()
        );
    }
}
