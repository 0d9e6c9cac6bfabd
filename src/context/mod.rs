//! Conversational context: the only long-lived mutable state in the engine.
//! A flat map from slot key to a scalar or an ordered list, committed once
//! per turn and persisted wholesale.

pub mod store;

pub use store::{ContextError, ContextStore};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A context entry: scalar string or ordered list of strings. Lists keep
/// insertion order and hold no duplicates after an `add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    Scalar(String),
    List(Vec<String>),
}

impl ContextValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ContextValue::Scalar(value) => Some(value),
            ContextValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ContextValue::List(values) => Some(values),
            ContextValue::Scalar(_) => None,
        }
    }
}

pub type Context = BTreeMap<String, ContextValue>;

/// Staged per-sample mutation: resolved final values for every touched key.
/// Computed against a snapshot, applied only for the winning sample.
pub type ContextPatch = BTreeMap<String, ContextValue>;

/// Append with recency re-ordering: an already-present equal element moves
/// to the end instead of duplicating.
pub fn add_element(list: &mut Vec<String>, element: String) {
    list.retain(|existing| *existing != element);
    list.push(element);
}

/// Delete every element equal to `element`; absent elements are a no-op.
pub fn remove_element(list: &mut Vec<String>, element: &str) {
    list.retain(|existing| existing != element);
}

#[cfg(test)]
mod tests;
