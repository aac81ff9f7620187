//! Ports: async interfaces to every external collaborator.
//!
//! The engine depends on these traits only; adapters provide the HTTP and
//! in-memory implementations.

mod knowledge;
mod language_model;
mod state_store;
mod ticketing;

pub use knowledge::{KnowledgeRetriever, Passage, RetrievalError};
pub use language_model::{Completion, CompletionRequest, LanguageModel, LanguageModelError};
pub use state_store::{StateStore, StateStoreError};
pub use ticketing::{NewTicket, TicketError, TicketGateway};
