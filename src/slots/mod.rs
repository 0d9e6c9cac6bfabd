//! Placeholder grammar for `%...%` slot tokens embedded in templates.

pub mod parser;

pub use parser::{Placeholder, SlotTable};
