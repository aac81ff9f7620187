//! Per-thread mutual exclusion.
//!
//! Two turns for the same thread must not interleave their load-route-save
//! cycles; turns for different threads must never contend. The registry
//! hands out one async mutex per thread id and prunes entries nobody holds.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::ThreadId;

/// Registry of per-thread locks.
#[derive(Debug, Default)]
pub struct ThreadLocks {
    inner: Mutex<HashMap<ThreadId, Arc<Mutex<()>>>>,
}

impl ThreadLocks {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for a thread, waiting if another turn holds it.
    ///
    /// The registry's own mutex is released before awaiting the per-thread
    /// lock, so a long turn on one thread never blocks acquisition for
    /// other threads.
    pub async fn acquire(&self, thread_id: ThreadId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut registry = self.inner.lock().await;
            Arc::clone(registry.entry(thread_id).or_default())
        };
        lock.lock_owned().await
    }

    /// Drops registry entries that no turn currently holds.
    pub async fn prune(&self) {
        let mut registry = self.inner.lock().await;
        registry.retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    /// Number of registered locks (for tests and diagnostics).
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    /// Returns true when no locks are registered.
    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}
