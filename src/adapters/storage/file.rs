//! File-based state store.
//!
//! Persists each thread as one YAML document under a base directory, which
//! survives restarts and keeps snapshots easy to inspect while debugging a
//! conversation.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::ThreadId;
use crate::domain::support::ThreadState;
use crate::ports::{StateStore, StateStoreError};

/// File-backed implementation of the [`StateStore`] port.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    base_path: PathBuf,
}

impl FileStateStore {
    /// Creates a store rooted at the given directory.
    ///
    /// The directory is created on first save.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn thread_file(&self, thread_id: ThreadId) -> PathBuf {
        self.base_path.join(format!("{}.yaml", thread_id))
    }

    async fn ensure_base_dir(&self) -> Result<(), StateStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StateStoreError::io(e.to_string()))
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn load(&self, thread_id: ThreadId) -> Result<Option<ThreadState>, StateStoreError> {
        let path = self.thread_file(thread_id);

        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StateStoreError::io(e.to_string())),
        };

        let state = serde_yaml::from_str(&raw)
            .map_err(|e| StateStoreError::serialization(e.to_string()))?;
        Ok(Some(state))
    }

    async fn save(&self, state: &ThreadState) -> Result<(), StateStoreError> {
        self.ensure_base_dir().await?;

        let yaml = serde_yaml::to_string(state)
            .map_err(|e| StateStoreError::serialization(e.to_string()))?;

        fs::write(self.thread_file(state.thread_id), yaml)
            .await
            .map_err(|e| StateStoreError::io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::TenantId;
    use tempfile::TempDir;

    fn test_state() -> ThreadState {
        ThreadState::new(ThreadId::new(), TenantId::new("acme").unwrap())
    }

    #[tokio::test]
    async fn save_and_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path());
        let state = test_state()
            .with_exchange("hi", "hello")
            .with_policy_threshold(30);

        store.save(&state).await.unwrap();
        let loaded = store.load(state.thread_id).await.unwrap();

        assert_eq!(loaded, Some(state));
    }

    #[tokio::test]
    async fn unknown_thread_loads_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path());
        assert!(store.load(ThreadId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_replaces_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path());
        let state = test_state();

        store.save(&state).await.unwrap();
        store
            .save(&state.clone().with_policy_threshold(45))
            .await
            .unwrap();

        let loaded = store.load(state.thread_id).await.unwrap().unwrap();
        assert_eq!(loaded.policy_threshold_days, Some(45));
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_a_serialization_error() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path());
        let thread_id = ThreadId::new();

        fs::create_dir_all(dir.path()).await.unwrap();
        fs::write(
            dir.path().join(format!("{}.yaml", thread_id)),
            "not: [valid thread state",
        )
        .await
        .unwrap();

        let result = store.load(thread_id).await;
        assert!(matches!(result, Err(StateStoreError::Serialization(_))));
    }

    #[tokio::test]
    async fn base_dir_is_created_on_first_save() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("data").join("threads");
        let store = FileStateStore::new(&nested);

        store.save(&test_state()).await.unwrap();
        assert!(nested.exists());
    }
}
