//! Substitutes slot tokens in a response template with context values.
//! Rendering is total: missing keys and empty lists fall back to configured
//! literals, never to an error.

use crate::config::{EngineConfig, SlotOp};
use crate::context::{Context, ContextValue};
use crate::slots::{Placeholder, SlotTable};

pub struct Renderer;

impl Renderer {
    pub fn render(
        template: &str,
        context: &Context,
        table: &SlotTable,
        config: &EngineConfig,
    ) -> String {
        template
            .split_whitespace()
            .map(|token| match table.parse(token) {
                // Only the recognized core is replaced, so punctuation
                // around the token survives.
                Some(ph) => token.replace(&ph.raw, &Self::resolve(&ph, context, config)),
                None => token.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn resolve(ph: &Placeholder, context: &Context, config: &EngineConfig) -> String {
        let Some(value) = context.get(&ph.key) else {
            return config.missing_value.clone();
        };
        match value {
            ContextValue::Scalar(text) => text.clone(),
            ContextValue::List(elements) => match ph.op {
                SlotOp::Index => Self::indexed(ph, elements, config),
                _ => Self::natural_join(elements, config),
            },
        }
    }

    /// Zero elements fall back, one stands alone, more are comma-joined
    /// with " and " before the last.
    fn natural_join(elements: &[String], config: &EngineConfig) -> String {
        match elements {
            [] => config.missing_value.clone(),
            [only] => only.clone(),
            [rest @ .., last] => format!("{} and {}", rest.join(", "), last),
        }
    }

    /// Signed access: negative counts from the end, anything beyond ±len
    /// wraps to the first element.
    fn indexed(ph: &Placeholder, elements: &[String], config: &EngineConfig) -> String {
        let Some(index) = ph.index else {
            return config.no_index_message.clone();
        };
        if elements.is_empty() {
            return config.missing_value.clone();
        }
        let len = elements.len() as i64;
        let resolved = if index >= len || index < -len {
            0
        } else if index < 0 {
            (len + index) as usize
        } else {
            index as usize
        };
        elements[resolved].clone()
    }
}
