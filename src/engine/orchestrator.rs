//! High-level coordinator: normalize → score → extract → commit → render.
//! Drives one utterance to completion before the next is read.

use crate::config::{ConfigError, EngineConfig};
use crate::context::{Context, ContextError, ContextStore};
use crate::engine::corpus::{CorpusError, Sample};
use crate::extraction::{Extractor, StagedExtraction};
use crate::matching::{CompiledSample, Scorer};
use crate::preprocessing::Normalizer;
use crate::rendering::Renderer;
use crate::slots::SlotTable;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Corpus(#[from] CorpusError),
    #[error(transparent)]
    Context(#[from] ContextError),
    /// The turn completed and `response` is valid, but the context commit
    /// did not reach durable storage.
    #[error("context commit did not persist: {source}")]
    Persist {
        response: String,
        #[source]
        source: ContextError,
    },
}

/// Outcome of one processed utterance.
#[derive(Debug, Clone)]
pub struct Turn {
    pub response: String,
    pub confidence: f64,
    /// False when no sample cleared the threshold and a fallback was used.
    pub matched: bool,
}

pub(crate) struct Candidate {
    pub index: usize,
    pub staged: StagedExtraction,
}

pub(crate) struct Ranking {
    pub best: Vec<Candidate>,
    pub best_confidence: f64,
    /// Samples examined before the scan ended; stops early on a perfect
    /// match.
    pub scanned: usize,
}

pub struct Engine {
    config: EngineConfig,
    table: SlotTable,
    samples: Vec<CompiledSample>,
    store: ContextStore,
    rng: Box<dyn RngCore>,
}

impl Engine {
    pub fn new(
        config: EngineConfig,
        corpus: Vec<Sample>,
        store: ContextStore,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let table = SlotTable::new(&config.slots, &config.safe_punctuation);
        let samples = corpus
            .into_iter()
            .map(|sample| CompiledSample::compile(sample, &table, &config))
            .collect();
        Ok(Self {
            config,
            table,
            samples,
            store,
            rng: Box::new(StdRng::from_entropy()),
        })
    }

    /// Swap in a caller-supplied random source, e.g. a seeded RNG so
    /// tie-breaks become deterministic.
    pub fn with_rng(mut self, rng: Box<dyn RngCore>) -> Self {
        self.rng = rng;
        self
    }

    pub fn context(&self) -> &Context {
        self.store.committed()
    }

    /// Score every sample against the utterance, staging slot captures per
    /// candidate. Ties at the best confidence accumulate; a perfect match
    /// stops the scan.
    pub(crate) fn rank(&self, raw: &str) -> Ranking {
        let normalized = Normalizer::normalize(raw, &self.config);
        let raw_words: Vec<&str> = raw.split_whitespace().collect();
        let word_forms: Vec<String> = raw_words
            .iter()
            .map(|word| Normalizer::normalize(word, &self.config))
            .collect();
        let normalized_words: Vec<&str> = word_forms.iter().map(String::as_str).collect();
        let snapshot = self.store.snapshot();

        let mut best: Vec<Candidate> = Vec::new();
        let mut best_confidence = 0.0;
        let mut scanned = 0;

        for (index, sample) in self.samples.iter().enumerate() {
            scanned += 1;
            let mut breakdown = Scorer::score(&normalized, sample, &self.config.weights);
            if breakdown.maximum <= 0.0 {
                continue;
            }

            let staged = if sample.placeholders.is_empty() {
                StagedExtraction::default()
            } else {
                let staged = Extractor::extract(
                    &raw_words,
                    &normalized_words,
                    sample,
                    &snapshot,
                    &self.config,
                );
                for _ in 0..staged.confirmations {
                    breakdown.add_contingent(self.config.weights.word_exact);
                }
                staged
            };

            let confidence = breakdown.confidence();
            if confidence < self.config.minimum_confidence {
                continue;
            }
            if best.is_empty() || confidence > best_confidence {
                best_confidence = confidence;
                best.clear();
                best.push(Candidate { index, staged });
            } else if confidence == best_confidence {
                best.push(Candidate { index, staged });
            }
            if best_confidence >= 1.0 {
                break;
            }
        }

        Ranking {
            best,
            best_confidence,
            scanned,
        }
    }

    /// Process one utterance to completion: select the best sample, commit
    /// its staged context, persist, and render its response. The staged
    /// patches of the losing candidates are discarded.
    pub fn process_turn(&mut self, raw: &str) -> Result<Turn, EngineError> {
        let mut ranking = self.rank(raw);

        if ranking.best.is_empty() {
            let pick = self.rng.gen_range(0..self.config.fallback_responses.len());
            let template = self.config.fallback_responses[pick].clone();
            debug!(scanned = ranking.scanned, "no sample cleared the threshold");
            let response =
                Renderer::render(&template, self.store.committed(), &self.table, &self.config);
            return Ok(Turn {
                response,
                confidence: 0.0,
                matched: false,
            });
        }

        let pick = if ranking.best.len() == 1 {
            0
        } else {
            self.rng.gen_range(0..ranking.best.len())
        };
        let winner = ranking.best.swap_remove(pick);
        debug!(
            sample = winner.index,
            confidence = ranking.best_confidence,
            ties = ranking.best.len() + 1,
            "sample selected"
        );

        self.store.apply(winner.staged.patch);
        let response = Renderer::render(
            &self.samples[winner.index].sample.response,
            self.store.committed(),
            &self.table,
            &self.config,
        );
        if let Err(source) = self.store.persist() {
            return Err(EngineError::Persist { response, source });
        }

        Ok(Turn {
            response,
            confidence: ranking.best_confidence,
            matched: true,
        })
    }
}
