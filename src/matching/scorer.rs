//! Weighted confidence between a normalized utterance and one compiled
//! sample: positional and set-membership passes over characters and words,
//! plus phrase accumulation across consecutive positional word matches.

use crate::config::Weights;
use crate::matching::template::CompiledSample;
use std::collections::BTreeSet;

/// Accumulated weighted score against the template-derived maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub achieved: f64,
    pub maximum: f64,
}

impl ScoreBreakdown {
    /// Normalized confidence in [0, 1]. A zero maximum (empty template)
    /// yields 0.0, never a division fault.
    pub fn confidence(&self) -> f64 {
        if self.maximum <= 0.0 {
            0.0
        } else {
            self.achieved / self.maximum
        }
    }

    /// Contingent bonus raising both the achieved and the attainable score,
    /// used for confirmed `get`-slot captures.
    pub fn add_contingent(&mut self, weight: f64) {
        self.achieved += weight;
        self.maximum += weight;
    }
}

pub struct Scorer;

impl Scorer {
    pub fn score(input: &str, sample: &CompiledSample, weights: &Weights) -> ScoreBreakdown {
        let maximum = sample.max_score(weights);
        if maximum <= 0.0 {
            return ScoreBreakdown {
                achieved: 0.0,
                maximum: 0.0,
            };
        }
        if input == sample.normalized {
            return ScoreBreakdown {
                achieved: maximum,
                maximum,
            };
        }

        let mut achieved = 0.0;

        let input_chars: Vec<char> = input.chars().collect();
        let template_chars: Vec<char> = sample.normalized.chars().collect();
        for (a, b) in input_chars.iter().zip(&template_chars) {
            if a == b {
                achieved += weights.character_exact;
            }
        }
        let distinct_chars: BTreeSet<char> = template_chars.iter().copied().collect();
        for c in &distinct_chars {
            if input_chars.contains(c) {
                achieved += weights.character_partial;
            }
        }

        let input_words: Vec<&str> = input.split_whitespace().collect();
        let template_words: Vec<&str> = sample.words.iter().map(String::as_str).collect();
        for (a, b) in input_words.iter().zip(&template_words) {
            if a == b {
                achieved += weights.word_exact;
            }
        }
        let distinct_words: BTreeSet<&str> = template_words.iter().copied().collect();
        for word in &distinct_words {
            if input_words.contains(word) {
                achieved += weights.word_partial;
            }
        }

        // Phrase accumulation: grow across consecutive input words, award
        // while the phrase still agrees with the template span at the same
        // positions, reset as soon as agreement breaks.
        let mut phrase = String::new();
        let mut start = 0;
        for (i, word) in input_words.iter().enumerate() {
            if phrase.is_empty() {
                start = i;
            } else {
                phrase.push(' ');
            }
            phrase.push_str(word);

            let agrees = i < template_words.len() && template_words[start..=i].join(" ") == phrase;
            if agrees {
                achieved += weights.phrase_exact;
                if sample.normalized.contains(&phrase) {
                    achieved += weights.phrase_partial;
                }
            } else {
                phrase.clear();
            }
        }

        ScoreBreakdown { achieved, maximum }
    }
}
