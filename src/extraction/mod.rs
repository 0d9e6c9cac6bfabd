//! Slot extraction: binds unconsumed spans of the raw utterance to the
//! matched template's placeholders, staging a context patch per candidate.

pub mod extractor;

pub use extractor::{Extractor, StagedExtraction};
