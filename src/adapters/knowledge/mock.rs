//! In-memory knowledge retriever for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::TenantId;
use crate::ports::{KnowledgeRetriever, Passage, RetrievalError};

/// Fixture-backed implementation of the [`KnowledgeRetriever`] port.
///
/// Passages are keyed by tenant; the query is recorded but not matched
/// against, which keeps scenario tests deterministic.
#[derive(Debug, Clone, Default)]
pub struct MockKnowledgeRetriever {
    passages: Arc<Mutex<HashMap<String, Vec<Passage>>>>,
    queries: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl MockKnowledgeRetriever {
    /// Creates a retriever with no fixtures; every lookup returns empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a retriever whose every call fails with a backend error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Registers fixture passages for a tenant.
    pub fn with_passages(self, tenant: &str, texts: Vec<&str>) -> Self {
        self.passages.lock().unwrap().insert(
            tenant.to_string(),
            texts.into_iter().map(Passage::new).collect(),
        );
        self
    }

    /// All queries seen, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl KnowledgeRetriever for MockKnowledgeRetriever {
    async fn retrieve(
        &self,
        query: &str,
        tenant_id: &TenantId,
        top_k: usize,
    ) -> Result<Vec<Passage>, RetrievalError> {
        self.queries.lock().unwrap().push(query.to_string());

        if self.fail {
            return Err(RetrievalError::backend("mock retriever failure"));
        }

        let passages = self.passages.lock().unwrap();
        Ok(passages
            .get(tenant_id.as_str())
            .map(|p| p.iter().take(top_k).cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant(name: &str) -> TenantId {
        TenantId::new(name).unwrap()
    }

    #[tokio::test]
    async fn returns_fixtures_for_the_right_tenant() {
        let retriever = MockKnowledgeRetriever::new()
            .with_passages("acme", vec!["Returns within 30 days."])
            .with_passages("globex", vec!["Different policy."]);

        let acme = retriever.retrieve("q", &tenant("acme"), 3).await.unwrap();
        assert_eq!(acme.len(), 1);
        assert_eq!(acme[0].text, "Returns within 30 days.");

        let unknown = retriever.retrieve("q", &tenant("initech"), 3).await.unwrap();
        assert!(unknown.is_empty());
    }

    #[tokio::test]
    async fn respects_top_k() {
        let retriever =
            MockKnowledgeRetriever::new().with_passages("acme", vec!["a", "b", "c", "d"]);
        let passages = retriever.retrieve("q", &tenant("acme"), 2).await.unwrap();
        assert_eq!(passages.len(), 2);
    }

    #[tokio::test]
    async fn failing_variant_errors() {
        let retriever = MockKnowledgeRetriever::failing();
        let result = retriever.retrieve("q", &tenant("acme"), 3).await;
        assert!(matches!(result, Err(RetrievalError::Backend { .. })));
    }

    #[tokio::test]
    async fn records_queries() {
        let retriever = MockKnowledgeRetriever::new();
        retriever.retrieve("first", &tenant("acme"), 3).await.unwrap();
        retriever.retrieve("second", &tenant("acme"), 3).await.unwrap();
        assert_eq!(retriever.queries(), vec!["first", "second"]);
    }
}
