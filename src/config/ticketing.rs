//! Ticket-service collaborator configuration.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Ticket service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketingConfig {
    /// Base URL of the ticket service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl TicketingConfig {
    /// Get timeout as Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the ticketing configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.trim().is_empty() {
            return Err(ValidationError::invalid_value(
                "ticketing.base_url",
                "must not be empty",
            ));
        }
        Ok(())
    }
}

impl Default for TicketingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8200".to_string()
}

fn default_timeout() -> u64 {
    10
}
