use std::collections::HashMap;

/// Default OpenRouter API base
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Client configuration
///
/// Owned by the client instance for its lifetime and never mutated after
/// construction. The API key lives only in memory; it is attached to each
/// outgoing request and nothing else — not persisted, not logged (`Debug`
/// redacts it).
#[derive(Clone)]
pub struct ClientConfig {
    /// Secret used for the `Authorization: Bearer` header
    pub api_key: String,
    /// Extra headers merged into every request. The fixed `Content-Type`
    /// and `Authorization` headers win on key collision.
    pub default_headers: HashMap<String, String>,
    /// Base URL for the API
    pub base_url: String,
}

impl ClientConfig {
    /// Create a new config with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            default_headers: HashMap::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set multiple default headers
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.default_headers = headers;
        self
    }

    /// Point the client at a different base URL (compatible APIs, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"***")
            .field("default_headers", &self.default_headers)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("sk-test")
            .with_header("HTTP-Referer", "https://hms.example")
            .with_header("X-Title", "HMS");

        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.default_headers.len(), 2);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ClientConfig::new("sk-very-secret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("sk-very-secret"));
        assert!(printed.contains("***"));
    }
}
