//! Canonicalizes raw text: case folding, punctuation stripping, whole-word
//! contraction expansion and whitespace collapsing. Idempotent, so templates
//! and utterances can be normalized independently and still compare equal.

use crate::config::EngineConfig;

pub struct Normalizer;

impl Normalizer {
    pub fn normalize(text: &str, config: &EngineConfig) -> String {
        let lowered = text.to_lowercase();
        let stripped: String = lowered
            .chars()
            .filter(|c| !config.punctuation.contains(*c))
            .collect();
        let words: Vec<&str> = stripped.split_whitespace().collect();
        Self::expand_contractions(&words, &config.contractions).join(" ")
    }

    /// Expand contractions at word boundaries only, earliest table entry
    /// first. Keys may span several words; the table order is the caller's
    /// and is applied deterministically.
    fn expand_contractions(words: &[&str], table: &[(String, String)]) -> Vec<String> {
        let mut out = Vec::with_capacity(words.len());
        let mut i = 0;
        while i < words.len() {
            let mut matched = false;
            for (from, to) in table {
                let key: Vec<&str> = from.split_whitespace().collect();
                if key.is_empty() || words.len() - i < key.len() {
                    continue;
                }
                if words[i..i + key.len()] == key[..] {
                    out.extend(to.split_whitespace().map(str::to_string));
                    i += key.len();
                    matched = true;
                    break;
                }
            }
            if !matched {
                out.push(words[i].to_string());
                i += 1;
            }
        }
        out
    }
}
