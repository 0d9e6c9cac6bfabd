//! Input canonicalization applied before any matching.

pub mod normalizer;

pub use normalizer::Normalizer;
