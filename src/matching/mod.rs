//! Fuzzy multi-granularity matching between normalized utterances and
//! sample templates.

pub mod distance;
pub mod scorer;
pub mod template;

pub use distance::{fuzzy_eq, levenshtein, similarity, FUZZY_THRESHOLD};
pub use scorer::{ScoreBreakdown, Scorer};
pub use template::CompiledSample;
