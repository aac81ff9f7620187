//! Knowledge-retrieval adapters.

mod http;
mod mock;

pub use http::{HttpKnowledgeRetriever, KnowledgeSearchConfig};
pub use mock::MockKnowledgeRetriever;
