//! Language-model adapters.

mod anthropic;
mod mock;

pub use anthropic::{AnthropicConfig, AnthropicModel};
pub use mock::MockLanguageModel;
