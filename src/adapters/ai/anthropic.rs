//! Anthropic adapter - implementation of the [`LanguageModel`] port over the
//! Messages API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicConfig::new(api_key)
//!     .with_model("claude-sonnet-4-20250514")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let model = AnthropicModel::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{Completion, CompletionRequest, LanguageModel, LanguageModelError};

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Configuration for the Anthropic adapter.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Default max_tokens when the request does not set one.
    pub default_max_tokens: u32,
}

impl AnthropicConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(30),
            default_max_tokens: 1024,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the default max_tokens.
    pub fn with_default_max_tokens(mut self, max: u32) -> Self {
        self.default_max_tokens = max;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Anthropic Messages API implementation of the [`LanguageModel`] port.
pub struct AnthropicModel {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicModel {
    /// Creates a new adapter with the given configuration.
    pub fn new(config: AnthropicConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url)
    }

    fn to_api_request(&self, request: &CompletionRequest) -> ApiRequest {
        ApiRequest {
            model: self.config.model.clone(),
            max_tokens: request.max_tokens.unwrap_or(self.config.default_max_tokens),
            system: request.system.clone(),
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
            temperature: request.temperature,
        }
    }

    fn map_transport_error(&self, error: reqwest::Error) -> LanguageModelError {
        if error.is_timeout() {
            LanguageModelError::Timeout {
                timeout_secs: self.config.timeout.as_secs() as u32,
            }
        } else if error.is_connect() {
            LanguageModelError::network(format!("Connection failed: {}", error))
        } else {
            LanguageModelError::network(error.to_string())
        }
    }

    async fn handle_response_status(
        &self,
        response: Response,
    ) -> Result<Response, LanguageModelError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 => Err(LanguageModelError::AuthenticationFailed),
            429 => Err(LanguageModelError::rate_limited(60)),
            400 => Err(LanguageModelError::InvalidRequest(error_body)),
            500..=599 => Err(LanguageModelError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(LanguageModelError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }
}

#[async_trait]
impl LanguageModel for AnthropicModel {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<Completion, LanguageModelError> {
        let api_request = self.to_api_request(&request);

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let response = self.handle_response_status(response).await?;

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| LanguageModelError::parse(e.to_string()))?;

        let text = body
            .content
            .iter()
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(LanguageModelError::parse("response contained no text blocks"));
        }

        Ok(Completion::new(text, body.model))
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    #[allow(dead_code)]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_model() -> AnthropicModel {
        AnthropicModel::new(
            AnthropicConfig::new("sk-ant-test")
                .with_model("claude-test")
                .with_default_max_tokens(512),
        )
    }

    #[test]
    fn api_request_uses_prompt_as_single_user_message() {
        let model = test_model();
        let request = CompletionRequest::new("Classify this").with_system("Be terse");

        let api = model.to_api_request(&request);

        assert_eq!(api.model, "claude-test");
        assert_eq!(api.max_tokens, 512);
        assert_eq!(api.system.as_deref(), Some("Be terse"));
        assert_eq!(api.messages.len(), 1);
        assert_eq!(api.messages[0].role, "user");
        assert_eq!(api.messages[0].content, "Classify this");
    }

    #[test]
    fn request_max_tokens_overrides_default() {
        let model = test_model();
        let request = CompletionRequest::new("x").with_max_tokens(32);
        assert_eq!(model.to_api_request(&request).max_tokens, 32);
    }

    #[test]
    fn api_request_serializes_without_empty_fields() {
        let model = test_model();
        let api = model.to_api_request(&CompletionRequest::new("hello"));
        let json = serde_json::to_value(&api).unwrap();

        assert!(json.get("system").is_none());
        assert!(json.get("temperature").is_none());
        assert_eq!(json["messages"][0]["content"], "hello");
    }

    #[test]
    fn api_response_deserializes_text_blocks() {
        let raw = r#"{
            "content": [
                {"type": "text", "text": "Hello "},
                {"type": "text", "text": "world"}
            ],
            "model": "claude-test"
        }"#;
        let response: ApiResponse = serde_json::from_str(raw).unwrap();
        let text = response
            .content
            .iter()
            .filter_map(|b| b.text.as_deref())
            .collect::<String>();
        assert_eq!(text, "Hello world");
    }

    #[test]
    fn messages_url_joins_base() {
        let model = AnthropicModel::new(
            AnthropicConfig::new("key").with_base_url("http://localhost:9000"),
        );
        assert_eq!(model.messages_url(), "http://localhost:9000/v1/messages");
    }
}
