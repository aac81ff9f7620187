//! Application layer: turn orchestration over the collaborator ports.

mod classifier;
mod engine;
mod locks;
mod nodes;

pub use classifier::{ClassifiedTurn, IntentClassifier};
pub use engine::{
    EngineConfig, TurnEngine, TurnError, TurnOutcome, TurnProcessor, TurnRequest,
};
pub use locks::ThreadLocks;
pub use nodes::NodeOutcome;
