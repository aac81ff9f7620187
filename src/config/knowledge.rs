//! Knowledge-search collaborator configuration.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Vector-search service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeConfig {
    /// Base URL of the search service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Passages requested per lookup.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl KnowledgeConfig {
    /// Get timeout as Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the knowledge configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.trim().is_empty() {
            return Err(ValidationError::invalid_value(
                "knowledge.base_url",
                "must not be empty",
            ));
        }
        if self.top_k == 0 {
            return Err(ValidationError::invalid_value(
                "knowledge.top_k",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            top_k: default_top_k(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8100".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_top_k() -> usize {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = KnowledgeConfig::default();
        assert_eq!(config.top_k, 3);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_top_k_fails_validation() {
        let config = KnowledgeConfig {
            top_k: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
