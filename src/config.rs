//! Engine configuration: scoring weights, punctuation sets, the slot marker
//! table, contraction dictionary and fallback responses. Loaded once from a
//! TOML file and validated before the engine starts.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Per-granularity scoring weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weights {
    pub phrase_exact: f64,
    pub phrase_partial: f64,
    pub word_exact: f64,
    pub word_partial: f64,
    pub character_exact: f64,
    pub character_partial: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            phrase_exact: 3.0,
            phrase_partial: 1.5,
            word_exact: 2.0,
            word_partial: 1.0,
            character_exact: 0.1,
            character_partial: 0.05,
        }
    }
}

/// What a slot holds in context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    List,
}

/// What a recognized marker does. `get` and `index` read at render time;
/// the rest write during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotOp {
    Get,
    Set,
    Add,
    Remove,
    Clear,
    Index,
}

/// One slot-type definition: a value type plus the markers that select it.
/// The empty marker is the bare `%key%` form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotDef {
    pub kind: ValueType,
    pub markers: Vec<(String, SlotOp)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: Weights,
    /// Samples scoring below this confidence are discarded.
    pub minimum_confidence: f64,
    /// Characters stripped by the normalizer and from captured slot values.
    pub punctuation: String,
    /// Characters stripped around tokens before placeholder recognition.
    /// Must not contain `%`, `-` or `_` so slot syntax survives.
    pub safe_punctuation: String,
    /// Words that split a captured run into list elements, besides commas
    /// and periods.
    pub list_separators: Vec<String>,
    /// Templates answered when no sample clears the confidence threshold.
    pub fallback_responses: Vec<String>,
    /// Literal substituted for a missing or empty context value.
    pub missing_value: String,
    /// Literal substituted when an indexed placeholder carries no index.
    pub no_index_message: String,
    pub slots: Vec<SlotDef>,
    /// Whole-word contraction expansions, applied in this order.
    pub contractions: Vec<(String, String)>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            minimum_confidence: 0.25,
            punctuation: ".,!?;:'\"()[]{}*&#@~^|\\/<>".to_string(),
            safe_punctuation: ".,!?;:'\"()[]{}".to_string(),
            list_separators: vec!["and".to_string(), "or".to_string()],
            fallback_responses: vec![
                "I did not quite catch that.".to_string(),
                "Could you put that another way?".to_string(),
            ],
            missing_value: "nothing".to_string(),
            no_index_message: "no index specified".to_string(),
            slots: vec![
                SlotDef {
                    kind: ValueType::List,
                    markers: vec![
                        ("LIST".to_string(), SlotOp::Get),
                        ("LISTSET".to_string(), SlotOp::Set),
                        ("LISTADD".to_string(), SlotOp::Add),
                        ("LISTREMOVE".to_string(), SlotOp::Remove),
                        ("LISTCLEAR".to_string(), SlotOp::Clear),
                        ("LISTINDEX".to_string(), SlotOp::Index),
                    ],
                },
                SlotDef {
                    kind: ValueType::String,
                    markers: vec![
                        (String::new(), SlotOp::Set),
                        ("GET".to_string(), SlotOp::Get),
                    ],
                },
            ],
            contractions: vec![
                ("im".to_string(), "i am".to_string()),
                ("ive".to_string(), "i have".to_string()),
                ("id".to_string(), "i would".to_string()),
                ("dont".to_string(), "do not".to_string()),
                ("doesnt".to_string(), "does not".to_string()),
                ("didnt".to_string(), "did not".to_string()),
                ("cant".to_string(), "can not".to_string()),
                ("couldnt".to_string(), "could not".to_string()),
                ("wont".to_string(), "will not".to_string()),
                ("wouldnt".to_string(), "would not".to_string()),
                ("isnt".to_string(), "is not".to_string()),
                ("whats".to_string(), "what is".to_string()),
                ("thats".to_string(), "that is".to_string()),
                ("youre".to_string(), "you are".to_string()),
            ],
        }
    }
}

impl EngineConfig {
    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check numeric ranges and required tables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        let all = [
            w.phrase_exact,
            w.phrase_partial,
            w.word_exact,
            w.word_partial,
            w.character_exact,
            w.character_partial,
        ];
        if all.iter().any(|v| *v < 0.0 || !v.is_finite()) {
            return Err(ConfigError::Invalid(
                "weights must be finite and non-negative".to_string(),
            ));
        }
        if all.iter().sum::<f64>() <= 0.0 {
            return Err(ConfigError::Invalid(
                "at least one weight must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.minimum_confidence) {
            return Err(ConfigError::Invalid(
                "minimum_confidence must be within [0, 1]".to_string(),
            ));
        }
        if self.fallback_responses.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one fallback response is required".to_string(),
            ));
        }
        if self.slots.is_empty() {
            return Err(ConfigError::Invalid(
                "the slot table must not be empty".to_string(),
            ));
        }
        for def in &self.slots {
            if def.markers.is_empty() {
                return Err(ConfigError::Invalid(
                    "every slot definition needs at least one marker".to_string(),
                ));
            }
            if def.kind == ValueType::String
                && def.markers.iter().any(|(_, op)| *op == SlotOp::Index)
            {
                return Err(ConfigError::Invalid(
                    "index markers are only valid on list slots".to_string(),
                ));
            }
        }
        if self
            .safe_punctuation
            .contains(|c| matches!(c, '%' | '-' | '_'))
        {
            return Err(ConfigError::Invalid(
                "safe_punctuation must not contain '%', '-' or '_'".to_string(),
            ));
        }
        if self.contractions.iter().any(|(from, _)| from.is_empty()) {
            return Err(ConfigError::Invalid(
                "contraction keys must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_negative_weight() {
        let mut config = EngineConfig::default();
        config.weights.word_exact = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_confidence() {
        let mut config = EngineConfig::default();
        config.minimum_confidence = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_slot_syntax_in_safe_punctuation() {
        let mut config = EngineConfig::default();
        config.safe_punctuation.push('%');
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_partial_toml_over_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            minimum_confidence = 0.4

            [weights]
            phrase_exact = 2.0
            phrase_partial = 1.0
            word_exact = 2.0
            word_partial = 1.0
            character_exact = 0.2
            character_partial = 0.1
            "#,
        )
        .unwrap();
        assert_eq!(config.minimum_confidence, 0.4);
        assert_eq!(config.weights.character_exact, 0.2);
        assert!(!config.slots.is_empty());
    }
}
