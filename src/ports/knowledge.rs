//! Knowledge Retrieval Port - tenant-scoped similarity search.
//!
//! "No match" is an empty list, never an error; implementations raise errors
//! only for transport failures. Callers degrade an error to the
//! empty-passages path, so a flaky search backend can never abort a turn.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::TenantId;

/// Port for tenant-scoped passage retrieval.
#[async_trait]
pub trait KnowledgeRetriever: Send + Sync {
    /// Returns up to `top_k` passages relevant to `query`, scoped to the
    /// given tenant. An empty vector means no match.
    async fn retrieve(
        &self,
        query: &str,
        tenant_id: &TenantId,
        top_k: usize,
    ) -> Result<Vec<Passage>, RetrievalError>;
}

/// A retrieved text passage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    /// Passage text.
    pub text: String,
    /// Source document identifier, when the backend provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Passage {
    /// Creates a passage with no source attribution.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: None,
        }
    }

    /// Sets the source document identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Retrieval transport errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RetrievalError {
    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// The search backend rejected or failed the request.
    #[error("backend error: {message}")]
    Backend {
        /// Error details.
        message: String,
    },

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl RetrievalError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}
