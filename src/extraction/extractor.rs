//! Locates the words of an utterance the template does not account for and
//! stages them as slot values. Runs for every candidate sample during
//! scoring; the staged patch is committed only for the winner.

use crate::config::{EngineConfig, SlotOp, ValueType};
use crate::context::{add_element, remove_element, Context, ContextPatch, ContextValue};
use crate::matching::{fuzzy_eq, CompiledSample};

/// One sample's staged slot captures.
#[derive(Debug, Clone, Default)]
pub struct StagedExtraction {
    pub patch: ContextPatch,
    /// Scalar `get` captures that equal the committed context value. Each
    /// one earns the confirmation bonus during scoring.
    pub confirmations: usize,
}

pub struct Extractor;

impl Extractor {
    /// `raw_words` are the utterance split on whitespace, untouched;
    /// `normalized_words` are the same words normalized one by one, so the
    /// two line up positionally.
    pub fn extract(
        raw_words: &[&str],
        normalized_words: &[&str],
        sample: &CompiledSample,
        snapshot: &Context,
        config: &EngineConfig,
    ) -> StagedExtraction {
        let consumed = Self::consumption(normalized_words, sample);
        let mut staged = StagedExtraction::default();
        let mut cursor = 0;

        for ph in &sample.placeholders {
            // Clear needs no captured value.
            if ph.kind == ValueType::List && ph.op == SlotOp::Clear {
                staged
                    .patch
                    .insert(ph.key.clone(), ContextValue::List(Vec::new()));
                continue;
            }

            let Some((start, end)) = Self::next_run(&consumed, cursor) else {
                continue;
            };
            cursor = end;
            let captured = &raw_words[start..end];

            match ph.kind {
                ValueType::String => {
                    let value = Self::clean_scalar(captured, config);
                    if value.is_empty() {
                        continue;
                    }
                    match ph.op {
                        SlotOp::Set => {
                            staged.patch.insert(ph.key.clone(), ContextValue::Scalar(value));
                        }
                        SlotOp::Get => {
                            let current = snapshot.get(&ph.key).and_then(ContextValue::as_scalar);
                            if current == Some(value.as_str()) {
                                staged.confirmations += 1;
                            }
                        }
                        _ => {}
                    }
                }
                ValueType::List => {
                    let elements = Self::split_elements(captured, config);
                    if elements.is_empty() {
                        continue;
                    }
                    let mut list = snapshot
                        .get(&ph.key)
                        .and_then(ContextValue::as_list)
                        .map(<[String]>::to_vec)
                        .unwrap_or_default();
                    match ph.op {
                        SlotOp::Set => list = elements,
                        SlotOp::Add => {
                            for element in elements {
                                add_element(&mut list, element);
                            }
                        }
                        SlotOp::Remove => {
                            for element in &elements {
                                remove_element(&mut list, element);
                            }
                        }
                        // Read markers stage nothing from the input side.
                        SlotOp::Get | SlotOp::Index | SlotOp::Clear => continue,
                    }
                    staged.patch.insert(ph.key.clone(), ContextValue::List(list));
                }
            }
        }
        staged
    }

    /// A word is consumed when it normalizes to a substring of the stripped
    /// template, or when it is fuzzily equal to the template word at the
    /// same position.
    fn consumption(normalized_words: &[&str], sample: &CompiledSample) -> Vec<bool> {
        normalized_words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                sample.normalized.contains(word)
                    || sample
                        .words
                        .get(i)
                        .is_some_and(|template_word| fuzzy_eq(word, template_word))
            })
            .collect()
    }

    /// Maximal run of unconsumed words starting at or after `from`. A
    /// consumed word ends the run only when the following word is consumed
    /// too (one-word lookahead) or the input ends.
    fn next_run(consumed: &[bool], from: usize) -> Option<(usize, usize)> {
        let total = consumed.len();
        let start = (from..total).find(|&i| !consumed[i])?;
        let mut end = start + 1;
        while end < total {
            if consumed[end] && (end + 1 >= total || consumed[end + 1]) {
                break;
            }
            end += 1;
        }
        Some((start, end))
    }

    fn clean_scalar(words: &[&str], config: &EngineConfig) -> String {
        let stripped: String = words
            .join(" ")
            .to_lowercase()
            .chars()
            .filter(|c| !config.punctuation.contains(*c))
            .collect();
        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Split a captured run into list elements on commas, periods and the
    /// configured separator words, cleaning each element like a scalar.
    fn split_elements(words: &[&str], config: &EngineConfig) -> Vec<String> {
        let marked: Vec<String> = words
            .iter()
            .map(|word| {
                let lowered = word.to_lowercase();
                let bare = lowered.trim_matches(|c: char| config.punctuation.contains(c));
                if config.list_separators.iter().any(|sep| sep == bare) {
                    ",".to_string()
                } else {
                    lowered
                }
            })
            .collect();
        marked
            .join(" ")
            .split(|c| c == ',' || c == '.')
            .map(|element| {
                let stripped: String = element
                    .chars()
                    .filter(|c| !config.punctuation.contains(*c))
                    .collect();
                stripped.split_whitespace().collect::<Vec<_>>().join(" ")
            })
            .filter(|element| !element.is_empty())
            .collect()
    }
}
