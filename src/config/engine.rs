//! Turn-engine configuration.

use serde::Deserialize;

use super::error::ValidationError;

/// Engine behavior settings.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Whether the deterministic greeting pre-check is enabled.
    #[serde(default = "default_greeting_precheck")]
    pub greeting_precheck: bool,

    /// Which state store backs thread persistence.
    #[serde(default)]
    pub state_backend: StateBackend,

    /// Directory for the file-backed state store.
    #[serde(default = "default_state_dir")]
    pub state_dir: String,
}

/// State store backend selection.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StateBackend {
    /// Durable YAML-file-per-thread store.
    #[default]
    File,
    /// Ephemeral in-process store.
    Memory,
}

impl EngineSettings {
    /// Validate the engine settings.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.state_backend == StateBackend::File && self.state_dir.trim().is_empty() {
            return Err(ValidationError::invalid_value(
                "engine.state_dir",
                "must not be empty when the file backend is selected",
            ));
        }
        Ok(())
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            greeting_precheck: default_greeting_precheck(),
            state_backend: StateBackend::default(),
            state_dir: default_state_dir(),
        }
    }
}

fn default_greeting_precheck() -> bool {
    true
}

fn default_state_dir() -> String {
    "./data/threads".to_string()
}
