use async_trait::async_trait;
use hms_core::chat::{ChatRequest, ChatResponse};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{LlmError, Result};
use crate::sanitize::clean_response;

/// The send capability, behind a trait so callers can swap in fakes.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Send one chat completion request and await the full response.
    async fn send(&self, request: ChatRequest) -> Result<ChatResponse>;
}

/// OpenRouter chat completion client
///
/// A thin wrapper over one POST to `{base_url}/chat/completions`. On
/// purpose it carries no retry, no client-side timeout, and no status-code
/// handling: a non-2xx response with a JSON body comes back as an ordinary
/// [`ChatResponse`] and the caller inspects it for service-reported errors.
/// Callers that need timeouts or cancellation configure them on the
/// injected `reqwest::Client`; an aborted call surfaces as
/// [`LlmError::Transport`].
///
/// Known limitation: `stream: true` is forwarded on the wire but the
/// response is still read as a single JSON body, so a service that honors
/// the flag will fail to parse here.
pub struct OpenRouterClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl OpenRouterClient {
    /// Create a client with a default transport
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Create a client over a caller-configured transport
    pub fn with_http_client(config: ClientConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Build request headers.
    ///
    /// Default headers go in first; `Content-Type` and `Authorization` are
    /// inserted afterwards so they win any key collision.
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        for (key, value) in &self.config.default_headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| LlmError::Config(format!("invalid header name {key:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| LlmError::Config(format!("invalid value for header {key:?}: {e}")))?;
            headers.insert(name, value);
        }

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key))
            .map_err(|e| LlmError::Config(format!("invalid authorization value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        Ok(headers)
    }

    /// Send one chat completion request.
    pub async fn send(&self, request: ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let headers = self.build_headers()?;

        log::debug!("POST {} model={}", url, request.model);

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        // The status code is intentionally ignored; error bodies are still
        // JSON and pass through to the caller.
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let raw: Value =
            serde_json::from_str(&body).map_err(|e| LlmError::Parse(e.to_string()))?;

        let mut response = ChatResponse::new(raw);
        response.map_primary_content(clean_response);
        Ok(response)
    }
}

#[async_trait]
impl ChatCompletion for OpenRouterClient {
    async fn send(&self, request: ChatRequest) -> Result<ChatResponse> {
        OpenRouterClient::send(self, request).await
    }
}
