use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub version: String,
    pub ai: AiConfig,
    pub backend: BackendConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            ai: AiConfig::default(),
            backend: BackendConfig::default(),
        }
    }
}

impl Config {
    /// Look up a value by dotted key
    pub fn get_value(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();
        match parts.as_slice() {
            ["version"] => Some(self.version.clone()),
            ["ai", "api_key_env"] => Some(self.ai.api_key_env.clone()),
            ["ai", "model"] => Some(self.ai.model.clone()),
            ["ai", "referer"] => self.ai.referer.clone(),
            ["ai", "title"] => Some(self.ai.title.clone()),
            ["backend", "base_url"] => Some(self.backend.base_url.clone()),
            _ => None,
        }
    }

    /// Set a value by dotted key
    pub fn set_value(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        let parts: Vec<&str> = key.split('.').collect();
        match parts.as_slice() {
            ["ai", "api_key_env"] => {
                self.ai.api_key_env = value.to_string();
            }
            ["ai", "model"] => {
                self.ai.model = value.to_string();
            }
            ["ai", "referer"] => {
                self.ai.referer = Some(value.to_string());
            }
            ["ai", "title"] => {
                self.ai.title = value.to_string();
            }
            ["backend", "base_url"] => {
                self.backend.base_url = value.to_string();
            }
            _ => return Err(ConfigError::KeyNotFound(key.to_string())),
        }
        Ok(())
    }
}

/// AI assistant settings
///
/// The API key itself is never stored here. The config names the
/// environment variable that holds it and the key is read at call time,
/// so nothing secret ever lands in the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiConfig {
    /// Environment variable holding the OpenRouter API key
    pub api_key_env: String,
    /// Default model identifier
    pub model: String,
    /// Optional HTTP-Referer header value sent with AI requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
    /// X-Title header value sent with AI requests
    pub title: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            model: "openai/gpt-4o".to_string(),
            referer: None,
            title: "HMS".to_string(),
        }
    }
}

impl AiConfig {
    /// Read the API key from the configured environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env).ok().filter(|k| !k.is_empty())
    }
}

/// Hospital backend settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ai.model, "openai/gpt-4o");
        assert_eq!(config.ai.title, "HMS");
        assert_eq!(config.backend.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_get_set_by_dotted_key() {
        let mut config = Config::default();
        config.set_value("ai.model", "anthropic/claude-3.5-sonnet").unwrap();
        assert_eq!(
            config.get_value("ai.model").as_deref(),
            Some("anthropic/claude-3.5-sonnet")
        );

        assert!(config.get_value("ai.referer").is_none());
        config.set_value("ai.referer", "https://hms.example").unwrap();
        assert_eq!(config.get_value("ai.referer").as_deref(), Some("https://hms.example"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut config = Config::default();
        assert!(matches!(
            config.set_value("ai.api_key", "sk-test"),
            Err(ConfigError::KeyNotFound(_))
        ));
    }

    #[test]
    fn test_api_key_never_serialized() {
        std::env::set_var("HMS_TEST_KEY_ENV", "sk-secret");
        let mut config = Config::default();
        config.ai.api_key_env = "HMS_TEST_KEY_ENV".to_string();

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
        assert_eq!(config.ai.resolve_api_key().as_deref(), Some("sk-secret"));
    }
}
