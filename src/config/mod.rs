//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `DESKFLOW_` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use deskflow::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod ai;
mod engine;
mod error;
mod knowledge;
mod server;
mod ticketing;

pub use ai::AiConfig;
pub use engine::{EngineSettings, StateBackend};
pub use error::{ConfigError, ValidationError};
pub use knowledge::KnowledgeConfig;
pub use server::{Environment, ServerConfig};
pub use ticketing::TicketingConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, environment).
    #[serde(default)]
    pub server: ServerConfig,

    /// Language-model provider configuration.
    #[serde(default)]
    pub ai: AiConfig,

    /// Knowledge-search collaborator configuration.
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Ticket-service collaborator configuration.
    #[serde(default)]
    pub ticketing: TicketingConfig,

    /// Turn-engine settings.
    #[serde(default)]
    pub engine: EngineSettings,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// This function:
    /// 1. Loads a `.env` file if present (for development)
    /// 2. Reads environment variables with the `DESKFLOW` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// For example, `DESKFLOW_SERVER__PORT=9000` sets `server.port`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("DESKFLOW")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Validate every configuration section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.knowledge.validate()?;
        self.ticketing.validate()?;
        self.engine.validate()?;
        Ok(())
    }
}
