//! In-memory state store.
//!
//! Keeps thread snapshots in a shared map. Useful for tests and for
//! single-process deployments where thread state may be ephemeral.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::ThreadId;
use crate::domain::support::ThreadState;
use crate::ports::{StateStore, StateStoreError};

/// In-memory implementation of the [`StateStore`] port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStateStore {
    threads: Arc<RwLock<HashMap<ThreadId, ThreadState>>>,
}

impl InMemoryStateStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all stored threads (useful for tests).
    pub async fn clear(&self) {
        self.threads.write().await.clear();
    }

    /// Number of stored threads.
    pub async fn thread_count(&self) -> usize {
        self.threads.read().await.len()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn load(&self, thread_id: ThreadId) -> Result<Option<ThreadState>, StateStoreError> {
        let threads = self.threads.read().await;
        Ok(threads.get(&thread_id).cloned())
    }

    async fn save(&self, state: &ThreadState) -> Result<(), StateStoreError> {
        let mut threads = self.threads.write().await;
        threads.insert(state.thread_id, state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::TenantId;

    fn test_state() -> ThreadState {
        ThreadState::new(ThreadId::new(), TenantId::new("acme").unwrap())
    }

    #[tokio::test]
    async fn save_and_load_round_trips() {
        let store = InMemoryStateStore::new();
        let state = test_state().with_exchange("hi", "hello");

        store.save(&state).await.unwrap();
        let loaded = store.load(state.thread_id).await.unwrap();

        assert_eq!(loaded, Some(state));
    }

    #[tokio::test]
    async fn unknown_thread_loads_none() {
        let store = InMemoryStateStore::new();
        let loaded = store.load(ThreadId::new()).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn save_replaces_previous_snapshot() {
        let store = InMemoryStateStore::new();
        let state = test_state();

        store.save(&state).await.unwrap();
        let updated = state.clone().with_policy_threshold(30);
        store.save(&updated).await.unwrap();

        let loaded = store.load(state.thread_id).await.unwrap().unwrap();
        assert_eq!(loaded.policy_threshold_days, Some(30));
        assert_eq!(store.thread_count().await, 1);
    }

    #[tokio::test]
    async fn threads_are_isolated() {
        let store = InMemoryStateStore::new();
        let a = test_state();
        let b = test_state().with_policy_threshold(7);

        store.save(&a).await.unwrap();
        store.save(&b).await.unwrap();

        assert_eq!(store.thread_count().await, 2);
        let loaded_a = store.load(a.thread_id).await.unwrap().unwrap();
        assert!(loaded_a.policy_threshold_days.is_none());
    }

    #[tokio::test]
    async fn concurrent_access_is_safe() {
        let store = InMemoryStateStore::new();
        let state = test_state();
        let thread_id = state.thread_id;

        let store1 = store.clone();
        let state1 = state.clone();
        let writer = tokio::spawn(async move {
            store1.save(&state1).await.unwrap();
        });

        let store2 = store.clone();
        let reader = tokio::spawn(async move {
            tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
            store2.load(thread_id).await.unwrap()
        });

        writer.await.unwrap();
        assert!(reader.await.unwrap().is_some());
    }
}
