//! Public façade for the engine layer: corpus loading and per-turn
//! orchestration.

pub mod corpus;
pub mod orchestrator;

pub use corpus::{CorpusError, Sample};
pub use orchestrator::{Engine, EngineError, Turn};
