//! Durable storage for the committed context: loaded at startup, applied
//! all-or-nothing per turn, written back synchronously after each commit.

use crate::context::{Context, ContextPatch};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("context storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("context serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub struct ContextStore {
    committed: Context,
    path: Option<PathBuf>,
}

impl ContextStore {
    /// Volatile store with no backing file.
    pub fn in_memory() -> Self {
        Self {
            committed: Context::new(),
            path: None,
        }
    }

    /// Open a backing file, reading the existing context if one is there.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ContextError> {
        let path = path.as_ref().to_path_buf();
        let committed = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Context::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            committed,
            path: Some(path),
        })
    }

    pub fn committed(&self) -> &Context {
        &self.committed
    }

    /// Copy of the committed context, taken at the start of a scoring pass.
    pub fn snapshot(&self) -> Context {
        self.committed.clone()
    }

    /// Overwrite every key from the winning patch. Cannot fail for content
    /// reasons; all keys land or the patch was empty.
    pub fn apply(&mut self, patch: ContextPatch) {
        for (key, value) in patch {
            self.committed.insert(key, value);
        }
    }

    /// Write the full context to the backing file, synchronously.
    pub fn persist(&self) -> Result<(), ContextError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let serialized = serde_json::to_string_pretty(&self.committed)?;
        fs::write(path, serialized)?;
        debug!(entries = self.committed.len(), "context persisted");
        Ok(())
    }

    /// Apply and persist in one step.
    pub fn commit(&mut self, patch: ContextPatch) -> Result<(), ContextError> {
        self.apply(patch);
        self.persist()
    }
}
