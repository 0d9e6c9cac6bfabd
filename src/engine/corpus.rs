//! Sample corpus: an ordered JSON array of input/response template pairs.
//! The core only reads it; the trainer binary appends.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse corpus file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One corpus entry pairing an input template with a response template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub input: String,
    pub response: String,
}

/// Read the full corpus, preserving file order.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Sample>, CorpusError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Append one training pair, rewriting the file pretty-printed. A missing
/// file starts a fresh corpus.
pub fn append(path: impl AsRef<Path>, sample: &Sample) -> Result<(), CorpusError> {
    let path = path.as_ref();
    let mut samples = match load(path) {
        Ok(samples) => samples,
        Err(CorpusError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(err) => return Err(err),
    };
    samples.push(sample.clone());
    fs::write(path, serde_json::to_string_pretty(&samples)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn append_then_load_round_trips_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.json");

        let first = Sample {
            input: "hello".to_string(),
            response: "hi there".to_string(),
        };
        let second = Sample {
            input: "bye".to_string(),
            response: "see you".to_string(),
        };
        append(&path, &first).unwrap();
        append(&path, &second).unwrap();

        assert_eq!(load(&path).unwrap(), vec![first, second]);
    }

    #[test]
    fn malformed_corpus_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(load(&path), Err(CorpusError::Parse(_))));
    }
}
