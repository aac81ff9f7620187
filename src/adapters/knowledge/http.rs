//! HTTP adapter for the vector-search collaborator.
//!
//! The search service owns indexing and similarity ranking; this adapter
//! only ships the query with its tenant scope and maps the response. An
//! empty passage list is a normal result, not an error.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::foundation::TenantId;
use crate::ports::{KnowledgeRetriever, Passage, RetrievalError};

/// Configuration for the search-service client.
#[derive(Debug, Clone)]
pub struct KnowledgeSearchConfig {
    /// Base URL of the search service.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl KnowledgeSearchConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP implementation of the [`KnowledgeRetriever`] port.
pub struct HttpKnowledgeRetriever {
    config: KnowledgeSearchConfig,
    client: Client,
}

impl HttpKnowledgeRetriever {
    /// Creates a new retriever with the given configuration.
    pub fn new(config: KnowledgeSearchConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn search_url(&self) -> String {
        format!("{}/v1/search", self.config.base_url)
    }

    fn map_transport_error(&self, error: reqwest::Error) -> RetrievalError {
        if error.is_timeout() {
            RetrievalError::Timeout {
                timeout_secs: self.config.timeout.as_secs() as u32,
            }
        } else {
            RetrievalError::network(error.to_string())
        }
    }
}

#[async_trait]
impl KnowledgeRetriever for HttpKnowledgeRetriever {
    async fn retrieve(
        &self,
        query: &str,
        tenant_id: &TenantId,
        top_k: usize,
    ) -> Result<Vec<Passage>, RetrievalError> {
        let request = SearchRequest {
            query: query.to_string(),
            tenant_id: tenant_id.to_string(),
            top_k,
        };

        let response = self
            .client
            .post(self.search_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RetrievalError::backend(format!(
                "status {}: {}",
                status, body
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| RetrievalError::backend(format!("malformed response: {}", e)))?;

        Ok(body
            .passages
            .into_iter()
            .map(|p| Passage {
                text: p.text,
                source: p.source,
            })
            .collect())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest {
    query: String,
    tenant_id: String,
    top_k: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    passages: Vec<PassageDto>,
}

#[derive(Debug, Deserialize)]
struct PassageDto {
    text: String,
    #[serde(default)]
    source: Option<String>,
}
