//! Session State Store Port - durable per-thread conversation state.
//!
//! # Contract
//!
//! - `load` returns `None` for a thread that has never been saved; the
//!   caller builds the default state (it knows the tenant scope, the store
//!   does not).
//! - `save` replaces the thread's snapshot atomically with respect to other
//!   saves of the same thread.
//! - Turn-level read-modify-write atomicity is the engine's job (per-thread
//!   locking); the store only has to keep individual loads and saves
//!   consistent.
//! - A store failure is fatal for the turn: there is no safe default state.

use async_trait::async_trait;

use crate::domain::foundation::ThreadId;
use crate::domain::support::ThreadState;

/// Port for thread-state persistence.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Loads the state for a thread, or `None` if the thread is unknown.
    async fn load(&self, thread_id: ThreadId) -> Result<Option<ThreadState>, StateStoreError>;

    /// Persists the state snapshot for its thread.
    async fn save(&self, state: &ThreadState) -> Result<(), StateStoreError>;
}

/// State store errors. All of them are fatal for the turn that hits them.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StateStoreError {
    /// The backing store could not be reached.
    #[error("state store unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the backing medium failed.
    #[error("state store I/O error: {0}")]
    Io(String),

    /// A stored snapshot could not be encoded or decoded.
    #[error("state serialization failed: {0}")]
    Serialization(String),
}

impl StateStoreError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// Creates a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }
}
