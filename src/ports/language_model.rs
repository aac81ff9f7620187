//! Language Model Port - Interface for text-generation collaborators.
//!
//! Both surfaces the engine needs, single-shot classification and free-form
//! synthesis, are prompt-shaped calls against the same completion interface,
//! so one port covers them. Implementations connect to an external LLM
//! service and translate between its API and these types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for single-shot text completion.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generates a completion for the given request.
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, LanguageModelError>;
}

/// Request for a text completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// The full prompt text.
    pub prompt: String,
    /// Optional system instruction.
    pub system: Option<String>,
    /// Maximum tokens to generate; adapter default when unset.
    pub max_tokens: Option<u32>,
    /// Temperature for response randomness.
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Creates a request for the given prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Sets the system instruction.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// A generated completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    /// Generated text.
    pub text: String,
    /// Model that produced it.
    pub model: String,
}

impl Completion {
    /// Creates a completion.
    pub fn new(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
        }
    }
}

/// Language model errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LanguageModelError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl LanguageModelError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LanguageModelError::RateLimited { .. }
                | LanguageModelError::Unavailable { .. }
                | LanguageModelError::Network(_)
                | LanguageModelError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_works() {
        let request = CompletionRequest::new("Classify this")
            .with_system("Be terse")
            .with_max_tokens(64)
            .with_temperature(0.0);

        assert_eq!(request.prompt, "Classify this");
        assert_eq!(request.system.as_deref(), Some("Be terse"));
        assert_eq!(request.max_tokens, Some(64));
        assert_eq!(request.temperature, Some(0.0));
    }

    #[test]
    fn retryable_classification() {
        assert!(LanguageModelError::rate_limited(30).is_retryable());
        assert!(LanguageModelError::unavailable("down").is_retryable());
        assert!(LanguageModelError::network("reset").is_retryable());
        assert!(LanguageModelError::Timeout { timeout_secs: 30 }.is_retryable());

        assert!(!LanguageModelError::AuthenticationFailed.is_retryable());
        assert!(!LanguageModelError::parse("bad json").is_retryable());
        assert!(!LanguageModelError::InvalidRequest("empty".into()).is_retryable());
    }

    #[test]
    fn errors_display_correctly() {
        assert_eq!(
            LanguageModelError::rate_limited(30).to_string(),
            "rate limited: retry after 30s"
        );
        assert_eq!(
            LanguageModelError::Timeout { timeout_secs: 10 }.to_string(),
            "request timed out after 10s"
        );
    }
}
