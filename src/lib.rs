//! Retrieval-based conversational pattern engine: match an utterance against
//! a corpus of example exchanges, extract slot values, accumulate them in a
//! persistent context and render the winning response template.

pub mod config;
pub mod context;
pub mod engine;
pub mod extraction;
pub mod matching;
pub mod preprocessing;
pub mod rendering;
pub mod slots;

pub use config::{EngineConfig, SlotOp, ValueType};
pub use context::{Context, ContextStore, ContextValue};
pub use engine::{Engine, EngineError, Sample, Turn};
