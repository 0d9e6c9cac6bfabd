//! Per-sample compilation: the placeholder-stripped normalized template and
//! the distinct counts the maximum attainable score is derived from. The
//! maximum is a property of the template alone, so confidence does not
//! depend on input length.

use crate::config::{EngineConfig, Weights};
use crate::engine::corpus::Sample;
use crate::preprocessing::Normalizer;
use crate::slots::{Placeholder, SlotTable};
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct CompiledSample {
    pub sample: Sample,
    /// Placeholders of the input template, in token order.
    pub placeholders: Vec<Placeholder>,
    /// Input template with placeholder tokens removed, normalized.
    pub normalized: String,
    pub words: Vec<String>,
    pub distinct_chars: usize,
    pub distinct_words: usize,
}

impl CompiledSample {
    pub fn compile(sample: Sample, table: &SlotTable, config: &EngineConfig) -> Self {
        let mut kept: Vec<&str> = Vec::new();
        let mut placeholders = Vec::new();
        for token in sample.input.split_whitespace() {
            match table.parse(token) {
                Some(ph) => placeholders.push(ph),
                None => kept.push(token),
            }
        }
        let normalized = Normalizer::normalize(&kept.join(" "), config);
        let words: Vec<String> = normalized
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let distinct_chars = normalized.chars().collect::<BTreeSet<_>>().len();
        let distinct_words = words.iter().collect::<BTreeSet<_>>().len();

        Self {
            sample,
            placeholders,
            normalized,
            words,
            distinct_chars,
            distinct_words,
        }
    }

    /// Highest score this template can award across all granularities.
    pub fn max_score(&self, weights: &Weights) -> f64 {
        self.normalized.chars().count() as f64 * weights.character_exact
            + self.distinct_chars as f64 * weights.character_partial
            + self.words.len() as f64
                * (weights.word_exact + weights.phrase_exact + weights.phrase_partial)
            + self.distinct_words as f64 * weights.word_partial
    }
}
